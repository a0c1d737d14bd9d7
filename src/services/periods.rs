use crate::domain::models::{ReportingFrequency, ReportingPeriod};
use chrono::{Datelike, Days, Months, NaiveDate};

fn frequency_step(frequency: ReportingFrequency) -> Months {
    match frequency {
        ReportingFrequency::Monthly => Months::new(1),
        ReportingFrequency::Quarterly => Months::new(3),
        ReportingFrequency::Yearly => Months::new(12),
    }
}

/// Derive the gapless, ordered reporting period sequence for a contract.
///
/// Without an effective date there is nothing to tile: the result is empty
/// and the caller decides how to surface that. Without an expiration date
/// the boundary defaults to `today + horizon_days`.
///
/// Month arithmetic is calendar-correct: when the nominal day overflows the
/// target month (Jan 31 + 1 month), chrono clamps to the last valid day.
/// A clamped step already lands on the period's final day, so the next
/// period restarts on the 1st of the following month to keep the sequence
/// gapless and non-overlapping.
pub fn generate_periods(
    effective_date: Option<NaiveDate>,
    expiration_date: Option<NaiveDate>,
    frequency: ReportingFrequency,
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<ReportingPeriod> {
    let Some(start) = effective_date else {
        return Vec::new();
    };
    let boundary = expiration_date.unwrap_or_else(|| {
        today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(today)
    });

    let step = frequency_step(frequency);
    let mut periods = Vec::new();
    let mut cursor = start;

    while cursor <= boundary {
        let Some(next) = cursor.checked_add_months(step) else {
            break;
        };
        let (end, next_cursor) = if next.day() < cursor.day() {
            // clamped: `next` is the last valid day of its month
            (next, next.succ_opt())
        } else {
            let Some(end) = next.pred_opt() else { break };
            (end, Some(next))
        };
        periods.push(ReportingPeriod {
            start_date: cursor,
            end_date: end.min(boundary),
        });
        match next_cursor {
            Some(c) => cursor = c,
            None => break,
        }
    }

    periods
}
