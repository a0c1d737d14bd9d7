use crate::domain::models::{
    ComplianceReportItem, Contract, ContractStatus, ContractSummary, Portfolio, PortfolioError,
    ReportView, StatusReport, TenantSummary,
};
use crate::services::tree;
use chrono::NaiveDate;

/// Share of compliant items, in percent. `None` is the "no data" sentinel
/// for an empty item set and must stay distinguishable from `Some(0.0)`.
pub fn compliance_percentage(items: &[ComplianceReportItem]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let compliant = items.iter().filter(|i| i.is_compliant).count();
    Some(compliant as f64 / items.len() as f64 * 100.0)
}

/// Summary line for one contract: period count plus the newest period that
/// has a report, with that report's generation time and percentage.
pub fn contract_summary(contract: &Contract) -> ContractSummary {
    let latest = contract
        .periods
        .iter()
        .filter(|p| contract.report(p.start_date).is_some())
        .max_by_key(|p| p.end_date);
    let latest_report = latest.and_then(|p| contract.report(p.start_date));

    ContractSummary {
        name: contract.name.clone(),
        tenant: contract.tenant.clone(),
        status: contract.status,
        reporting_frequency: contract.reporting_frequency,
        period_count: contract.periods.len(),
        latest_period: latest.cloned(),
        latest_report_date: latest_report.map(|r| r.generated_at),
        compliance_percentage: latest_report.and_then(|r| compliance_percentage(&r.items)),
    }
}

pub fn status_report(portfolio: &Portfolio) -> StatusReport {
    let tenants = portfolio
        .tenants
        .iter()
        .map(|t| TenantSummary {
            name: t.name.clone(),
            contract_count: portfolio
                .contracts
                .iter()
                .filter(|c| c.tenant == t.name)
                .count(),
            active_contract_count: portfolio
                .contracts
                .iter()
                .filter(|c| c.tenant == t.name && c.status == ContractStatus::Active)
                .count(),
        })
        .collect();

    StatusReport {
        tenants,
        contracts: portfolio.contracts.iter().map(contract_summary).collect(),
        total_contracts: portfolio.contracts.len(),
        total_active_contracts: portfolio
            .contracts
            .iter()
            .filter(|c| c.status == ContractStatus::Active)
            .count(),
    }
}

/// Assemble the full display view of one period's report: counts, the
/// percentage (or its sentinel), and the SLA tree with verdicts attached.
/// The report must already exist; `lifecycle::ensure_report` handles the
/// absent case.
pub fn report_view(contract: &Contract, period_start: NaiveDate) -> Result<ReportView, PortfolioError> {
    let period = contract.period(period_start)?;
    let report = contract
        .report(period_start)
        .ok_or_else(|| PortfolioError::PeriodNotFound(contract.name.clone(), period_start))?;

    let compliant_items = report.items.iter().filter(|i| i.is_compliant).count();
    Ok(ReportView {
        contract: contract.name.clone(),
        period: period.clone(),
        generated_at: report.generated_at,
        checksum: report.checksum.clone(),
        compliant_items,
        total_items: report.items.len(),
        compliance_percentage: compliance_percentage(&report.items),
        tree: tree::build_tree(
            &contract.slas,
            &report.items,
            &contract.measurements,
            period_start,
        ),
    })
}
