use skidsheet_core::classify::Classification;
use skidsheet_core::model::{LineItem, Report};

const LINE_ITEM_COLUMNS: [&str; 14] = [
    "PART",
    "PART CLIENT",
    "DESCRIPTION",
    "PO",
    "QTY",
    "UOM",
    "BOX",
    "ORIGIN",
    "QTY PER SET",
    "TOTAL WEIGHT",
    "UNIT COST",
    "LABOR",
    "TOTAL COST",
    "SKID",
];

pub fn print_report(report: &Report) {
    let header = &report.header;
    println!("=== Shipment {} ===\n", header.shipment_number);
    println!("  Client:      {}", header.client_name);
    println!("  From:        {}", header.from);
    println!("  To:          {}", header.to);
    println!("  Export date: {}", header.export_date);
    println!();

    let mut rows: Vec<Vec<String>> = report.line_items.iter().map(line_item_cells).collect();

    // Subtotal row sums quantity, boxes, weight and total cost; SKID holds the skid count
    let totals = &report.subtotals;
    rows.push(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        totals.quantity.to_string(),
        String::new(),
        totals.boxes.to_string(),
        String::new(),
        String::new(),
        totals.weight.to_string(),
        String::new(),
        String::new(),
        totals.total_cost.to_string(),
        totals.skids.to_string(),
    ]);

    for line in render(&LINE_ITEM_COLUMNS, &rows) {
        println!("  {line}");
    }
    println!();

    println!("  Packaging:");
    let packaging: Vec<Vec<String>> = report
        .packaging_section
        .iter()
        .map(|item| {
            vec![
                item.part.to_string(),
                item.description.clone(),
                item.qty.to_string(),
            ]
        })
        .collect();
    for line in render(&["PART", "DESCRIPTION", "QUANTITY"], &packaging) {
        println!("    {line}");
    }
}

pub fn print_classification(classification: &Classification) {
    println!(
        "  {} of {} parts classified as packaging\n",
        classification.evidence.len(),
        classification.parts_seen
    );

    if classification.evidence.is_empty() {
        return;
    }

    let max_part = classification
        .evidence
        .iter()
        .map(|e| e.part.as_str().len())
        .max()
        .unwrap_or(10);

    for evidence in &classification.evidence {
        let strategies: Vec<String> = evidence.strategies.iter().map(|s| s.to_string()).collect();
        println!(
            "  {:<width$}  {}",
            evidence.part.as_str(),
            strategies.join(", "),
            width = max_part
        );
    }
}

fn line_item_cells(item: &LineItem) -> Vec<String> {
    vec![
        item.part.to_string(),
        item.client_part.clone(),
        item.description.clone(),
        item.po.clone(),
        item.qty.to_string(),
        item.uom.clone(),
        item.box_count.to_string(),
        item.origin.clone(),
        item.qty_per_set.to_string(),
        item.weight.to_string(),
        item.unit_cost.to_string(),
        item.labor.to_string(),
        item.total_cost.to_string(),
        item.skid.clone(),
    ]
}

/// Lay out a header row and data rows in left-aligned, padded columns.
fn render(columns: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&header, &widths));
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    lines
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
