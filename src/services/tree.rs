use crate::domain::models::{ComplianceReportItem, Measurement, SlaNode, SlaTreeNode};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Assemble the display tree for one report: each node carries its matched
/// report item (if any) plus the backing measurement, and its children.
///
/// The hierarchy is stored as parent back-references, so a parent->children
/// index is built once per pass and roots are the nodes with no parent.
/// Recursion is bounded by the node count and guarded by a visited set;
/// nodes on a malformed parent cycle are unreachable from any root and are
/// left to `validate` to report.
pub fn build_tree(
    slas: &[SlaNode],
    items: &[ComplianceReportItem],
    measurements: &[Measurement],
    period_start: NaiveDate,
) -> Vec<SlaTreeNode> {
    let mut children: HashMap<Option<&str>, Vec<&SlaNode>> = HashMap::new();
    for sla in slas {
        children.entry(sla.parent.as_deref()).or_default().push(sla);
    }

    let mut visited = HashSet::new();
    children
        .get(&None)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|root| assemble(root, &children, items, measurements, period_start, &mut visited))
        .collect()
}

fn assemble<'a>(
    node: &'a SlaNode,
    children: &HashMap<Option<&'a str>, Vec<&'a SlaNode>>,
    items: &[ComplianceReportItem],
    measurements: &[Measurement],
    period_start: NaiveDate,
    visited: &mut HashSet<&'a str>,
) -> SlaTreeNode {
    visited.insert(node.id.as_str());

    let item = items.iter().find(|i| i.sla == node.id).cloned();
    let measurement = item.as_ref().and_then(|i| {
        measurements
            .iter()
            .find(|m| m.period_start == period_start && m.sli == i.sli)
            .cloned()
    });

    let mut kids = Vec::new();
    for child in children
        .get(&Some(node.id.as_str()))
        .cloned()
        .unwrap_or_default()
    {
        if !visited.contains(child.id.as_str()) {
            kids.push(assemble(
                child,
                children,
                items,
                measurements,
                period_start,
                visited,
            ));
        }
    }

    SlaTreeNode {
        id: node.id.clone(),
        name: node.name.clone(),
        binding: node.binding.clone(),
        item,
        measurement,
        children: kids,
    }
}
