pub mod line_items;
pub mod packaging;

pub use line_items::{derive_client_part, line_items};
pub use packaging::{describe_packaging, packaging_summary};

use crate::classify::packaging_set;
use crate::model::{LineItem, RawRow, Report, ReportHeader, Subtotals};
use std::collections::HashSet;

/// Build a shipment report from raw query rows.
///
/// Classifies packaging once, then derives line items and the packaging
/// summary from the same rows. Pure: the same rows always give the same
/// report.
pub fn build_report(header: ReportHeader, rows: &[RawRow]) -> Report {
    let packaging = packaging_set(rows);
    let line_items = line_items(rows, &packaging);
    let packaging_section = packaging_summary(rows, &packaging);
    let subtotals = subtotals(&line_items);

    tracing::debug!(
        rows = rows.len(),
        line_items = line_items.len(),
        packaging_items = packaging_section.len() - 1,
        skids = subtotals.skids,
        "built shipment report"
    );

    Report {
        header,
        line_items,
        packaging_section,
        subtotals,
    }
}

pub fn subtotals(items: &[LineItem]) -> Subtotals {
    let mut totals = Subtotals::default();
    let mut skids = HashSet::new();

    for item in items {
        totals.quantity = totals.quantity.saturating_add(item.qty);
        totals.boxes += item.box_count;
        totals.weight = totals.weight.saturating_add(item.weight);
        totals.total_cost = totals.total_cost.saturating_add(item.total_cost);
        skids.insert(item.skid.as_str());
    }
    totals.skids = skids.len();

    totals
}
