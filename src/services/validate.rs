use crate::domain::models::{Contract, Portfolio, ValidationIssue};
use std::collections::HashSet;

fn issue(code: &str, contract: Option<&str>, detail: String) -> ValidationIssue {
    ValidationIssue {
        code: code.to_string(),
        contract: contract.map(str::to_string),
        detail,
    }
}

/// Integrity sweep over a loaded portfolio: dangling references, duplicate
/// keys, SLA parent cycles, and period sequence defects. Returns one issue
/// per finding; an empty list means the file is internally consistent.
pub fn validate_portfolio(portfolio: &Portfolio) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut tenant_names = HashSet::new();
    for tenant in &portfolio.tenants {
        if !tenant_names.insert(tenant.name.as_str()) {
            issues.push(issue(
                "duplicate_tenant",
                None,
                format!("tenant defined twice: {}", tenant.name),
            ));
        }
    }

    let mut sli_names = HashSet::new();
    for sli in &portfolio.slis {
        if !sli_names.insert(sli.name.as_str()) {
            issues.push(issue(
                "duplicate_sli",
                None,
                format!("SLI defined twice: {}", sli.name),
            ));
        }
    }

    let mut contract_names = HashSet::new();
    for contract in &portfolio.contracts {
        if !contract_names.insert(contract.name.as_str()) {
            issues.push(issue(
                "duplicate_contract",
                Some(contract.name.as_str()),
                format!("contract defined twice: {}", contract.name),
            ));
        }
        if !tenant_names.contains(contract.tenant.as_str()) {
            issues.push(issue(
                "unknown_tenant",
                Some(contract.name.as_str()),
                format!("references undefined tenant: {}", contract.tenant),
            ));
        }
        validate_contract(contract, &sli_names, &mut issues);
    }

    issues
}

fn validate_contract(
    contract: &Contract,
    sli_names: &HashSet<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let name = contract.name.as_str();

    let mut node_ids = HashSet::new();
    for sla in &contract.slas {
        if !node_ids.insert(sla.id.as_str()) {
            issues.push(issue(
                "duplicate_sla_id",
                Some(name),
                format!("SLA node id defined twice: {}", sla.id),
            ));
        }
    }

    for sla in &contract.slas {
        if let Some(parent) = &sla.parent {
            if !node_ids.contains(parent.as_str()) {
                issues.push(issue(
                    "unknown_sla_parent",
                    Some(name),
                    format!("SLA node {} references undefined parent: {}", sla.id, parent),
                ));
            }
        }
        if let Some(binding) = &sla.binding {
            if !sli_names.contains(binding.sli.as_str()) {
                issues.push(issue(
                    "unknown_sli",
                    Some(name),
                    format!("SLA node {} binds undefined SLI: {}", sla.id, binding.sli),
                ));
            }
        }
        if parent_chain_cycles(contract, sla.id.as_str()) {
            issues.push(issue(
                "sla_cycle",
                Some(name),
                format!("SLA node {} is part of a parent cycle", sla.id),
            ));
        }
    }

    let mut period_starts = HashSet::new();
    for period in &contract.periods {
        if period.start_date > period.end_date {
            issues.push(issue(
                "period_inverted",
                Some(name),
                format!("period {} ends before it starts", period.start_date),
            ));
        }
        if !period_starts.insert(period.start_date) {
            issues.push(issue(
                "duplicate_period",
                Some(name),
                format!("period start defined twice: {}", period.start_date),
            ));
        }
    }
    for pair in contract.periods.windows(2) {
        let expected = pair[0].end_date.succ_opt();
        if expected != Some(pair[1].start_date) {
            issues.push(issue(
                "period_not_contiguous",
                Some(name),
                format!(
                    "period {} does not start the day after {}",
                    pair[1].start_date, pair[0].end_date
                ),
            ));
        }
    }

    let mut measurement_keys = HashSet::new();
    for m in &contract.measurements {
        if !measurement_keys.insert((m.period_start, m.sli.as_str())) {
            issues.push(issue(
                "duplicate_measurement",
                Some(name),
                format!("measurement defined twice: {}/{}", m.period_start, m.sli),
            ));
        }
        if !period_starts.contains(&m.period_start) {
            issues.push(issue(
                "unknown_measurement_period",
                Some(name),
                format!("measurement {}/{} references no period", m.period_start, m.sli),
            ));
        }
        if !sli_names.contains(m.sli.as_str()) {
            issues.push(issue(
                "unknown_sli",
                Some(name),
                format!("measurement {}/{} references undefined SLI", m.period_start, m.sli),
            ));
        }
    }

    let mut report_periods = HashSet::new();
    for report in &contract.reports {
        if !report_periods.insert(report.period_start) {
            issues.push(issue(
                "duplicate_report",
                Some(name),
                format!("more than one report for period {}", report.period_start),
            ));
        }
        if !period_starts.contains(&report.period_start) {
            issues.push(issue(
                "report_without_period",
                Some(name),
                format!("report references no period: {}", report.period_start),
            ));
        }
        for item in &report.items {
            if !node_ids.contains(item.sla.as_str()) {
                issues.push(issue(
                    "report_item_unknown_sla",
                    Some(name),
                    format!(
                        "report {} item references undefined SLA node: {}",
                        report.period_start, item.sla
                    ),
                ));
            }
        }
    }
}

/// Walk the parent chain from one node. Bounded by the node count, so a
/// malformed chain terminates even without the visited check.
fn parent_chain_cycles(contract: &Contract, start: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = start;
    for _ in 0..=contract.slas.len() {
        if !seen.insert(current) {
            return true;
        }
        let Some(node) = contract.slas.iter().find(|s| s.id == current) else {
            return false;
        };
        match &node.parent {
            Some(parent) => current = parent.as_str(),
            None => return false,
        }
    }
    true
}
