use crate::domain::models::{
    ActivationReport, ComplianceReport, Contract, ContractStatus, PeriodsGenerated,
    PortfolioError, ReportGenerated,
};
use crate::services::{compliance, periods};
use chrono::{DateTime, NaiveDate, Utc};

/// Today's date for period generation boundaries. `PACTA_TODAY` overrides
/// the wall clock so flows with a horizon boundary stay reproducible.
pub fn today() -> NaiveDate {
    std::env::var("PACTA_TODAY")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// Explicit one-time period generation. The "already has periods" guard
/// lives here, at the call site of the generator: generation is never
/// implicit on edits, and a second invocation is a caller error.
pub fn generate_contract_periods(
    contract: &mut Contract,
    today: NaiveDate,
    horizon_days: u32,
) -> Result<PeriodsGenerated, PortfolioError> {
    if !contract.periods.is_empty() {
        return Err(PortfolioError::DuplicatePeriods(contract.name.clone()));
    }
    if contract.effective_date.is_none() {
        return Ok(PeriodsGenerated {
            contract: contract.name.clone(),
            created: 0,
            reason: Some("missing_effective_date".to_string()),
            periods: Vec::new(),
        });
    }

    let generated = periods::generate_periods(
        contract.effective_date,
        contract.expiration_date,
        contract.reporting_frequency,
        today,
        horizon_days,
    );
    contract.periods = generated.clone();
    Ok(PeriodsGenerated {
        contract: contract.name.clone(),
        created: generated.len(),
        reason: None,
        periods: generated,
    })
}

/// Mark a contract ACTIVE and, when it has an effective date but no periods
/// yet, derive its reporting periods. Re-activating a contract that already
/// has periods changes the status only.
pub fn activate_contract(
    contract: &mut Contract,
    today: NaiveDate,
    horizon_days: u32,
) -> ActivationReport {
    contract.status = ContractStatus::Active;

    let mut periods_created = 0;
    if contract.effective_date.is_some() && contract.periods.is_empty() {
        let generated = periods::generate_periods(
            contract.effective_date,
            contract.expiration_date,
            contract.reporting_frequency,
            today,
            horizon_days,
        );
        periods_created = generated.len();
        contract.periods = generated;
    }

    ActivationReport {
        contract: contract.name.clone(),
        status: contract.status,
        periods_created,
    }
}

/// Evaluate one period and replace the report's item set wholesale. The
/// report shell is created if absent; existing items are never mutated in
/// place, only discarded with the rest of the set.
pub fn generate_report(
    contract: &mut Contract,
    period_start: NaiveDate,
    now: DateTime<Utc>,
) -> Result<ReportGenerated, PortfolioError> {
    let period = contract.period(period_start)?.clone();
    let items = compliance::evaluate(&period, &contract.slas, &contract.measurements);
    let checksum = compliance::item_set_checksum(&items);
    let item_count = items.len();

    match contract
        .reports
        .iter_mut()
        .find(|r| r.period_start == period_start)
    {
        Some(report) => {
            report.items = items;
            report.generated_at = now;
            report.checksum = checksum.clone();
        }
        None => contract.reports.push(ComplianceReport {
            period_start,
            generated_at: now,
            checksum: checksum.clone(),
            items,
        }),
    }

    Ok(ReportGenerated {
        contract: contract.name.clone(),
        period_start,
        items: item_count,
        checksum,
    })
}

/// Create-and-generate a report only when none exists yet. Returns whether
/// a report was generated.
pub fn ensure_report(
    contract: &mut Contract,
    period_start: NaiveDate,
    now: DateTime<Utc>,
) -> Result<bool, PortfolioError> {
    contract.period(period_start)?;
    if contract.report(period_start).is_some() {
        return Ok(false);
    }
    generate_report(contract, period_start, now)?;
    Ok(true)
}

/// Batch regenerate: one report per existing period, oldest first.
pub fn generate_all_reports(
    contract: &mut Contract,
    now: DateTime<Utc>,
) -> Result<Vec<ReportGenerated>, PortfolioError> {
    let starts: Vec<NaiveDate> = contract.periods.iter().map(|p| p.start_date).collect();
    starts
        .into_iter()
        .map(|start| generate_report(contract, start, now))
        .collect()
}

/// Split a `contract@YYYY-MM-DD` period reference.
pub fn parse_period_ref(raw: &str) -> Result<(String, NaiveDate), PortfolioError> {
    let Some((contract, date)) = raw.rsplit_once('@') else {
        return Err(PortfolioError::BadPeriodRef(raw.to_string()));
    };
    let start: NaiveDate = date
        .parse()
        .map_err(|_| PortfolioError::BadPeriodRef(raw.to_string()))?;
    if contract.is_empty() {
        return Err(PortfolioError::BadPeriodRef(raw.to_string()));
    }
    Ok((contract.to_string(), start))
}
