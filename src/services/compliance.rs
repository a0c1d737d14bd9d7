use crate::domain::models::{
    ComplianceReportItem, Measurement, ReportingPeriod, SlaNode, ThresholdType,
};
use sha2::{Digest, Sha256};

/// Evaluate one reporting period against a contract's SLA nodes.
///
/// Emits one item per indicator-bearing node with a matching measurement,
/// in stored node order. A node without a measurement for the period is a
/// gap in the report, observable by absence, not an error. Organizational
/// nodes carry no binding and emit nothing; their children are evaluated
/// independently of them.
pub fn evaluate(
    period: &ReportingPeriod,
    slas: &[SlaNode],
    measurements: &[Measurement],
) -> Vec<ComplianceReportItem> {
    let mut items = Vec::new();
    for sla in slas {
        let Some(binding) = &sla.binding else { continue };
        let Some(measurement) = measurements
            .iter()
            .find(|m| m.period_start == period.start_date && m.sli == binding.sli)
        else {
            continue;
        };
        items.push(ComplianceReportItem {
            sla: sla.id.clone(),
            sli: binding.sli.clone(),
            is_compliant: is_compliant(binding.threshold_type, binding.threshold_value, measurement),
        });
    }
    items
}

/// Boundary values are compliant: MIN requires `calculated >= threshold`,
/// MAX requires `calculated <= threshold`.
pub fn is_compliant(
    threshold_type: ThresholdType,
    threshold_value: f64,
    measurement: &Measurement,
) -> bool {
    match threshold_type {
        ThresholdType::Min => measurement.calculated_value >= threshold_value,
        ThresholdType::Max => measurement.calculated_value <= threshold_value,
    }
}

/// SHA-256 over the canonical JSON of an item set. Regenerating a report
/// from unchanged inputs must reproduce this digest exactly.
pub fn item_set_checksum(items: &[ComplianceReportItem]) -> String {
    let canonical = serde_json::to_string(items).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
