//! Terminal rendering of query results and update statistics.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ndls_model::{StandardRecord, StandardStatus};
use ndls_sheet::UpdateSummary;

/// Render direct-query results as a table, with failures listed after.
pub fn print_query_table(records: &[StandardRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("标准号"),
        header_cell("标准名"),
        header_cell("状态"),
        header_cell("替代标准号"),
        header_cell("替代标准名"),
    ]);
    apply_table_style(&mut table);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.standard_no),
            Cell::new(record.name.clone().unwrap_or_default()),
            status_cell(record),
            Cell::new(record.replacement_nos()),
            Cell::new(record.replacement_names()),
        ]);
    }
    println!("{table}");

    let failures: Vec<&StandardRecord> = records.iter().filter(|r| r.failed()).collect();
    if !failures.is_empty() {
        eprintln!("Failures:");
        for record in failures {
            eprintln!(
                "- {}: {}",
                record.standard_no,
                record.error.as_deref().unwrap_or("unknown")
            );
        }
    }
}

/// Render the post-update statistics: output path, row totals, and the
/// status histogram.
pub fn print_update_summary(summary: &UpdateSummary, output: &Path) {
    println!("Output: {}", output.display());
    println!(
        "Rows: {} ({} queried, {} skipped, {} failed)",
        summary.rows, summary.queried, summary.skipped, summary.failed
    );
    if summary.status_counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("状态"), header_cell("数量")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in &summary.status_counts {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!("{table}");
    if summary.superseded > 0 {
        println!("{} 个标准已有替代标准", summary.superseded);
    }
}

fn status_cell(record: &StandardRecord) -> Cell {
    let cell = Cell::new(record.status.label());
    match record.status {
        StandardStatus::Active => cell.fg(Color::Green),
        StandardStatus::Superseded => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
        StandardStatus::Unknown => cell.fg(Color::DarkGrey),
        status if status.is_withdrawn() => cell.fg(Color::Red),
        _ => cell,
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
