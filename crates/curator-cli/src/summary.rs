use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use curator_model::{ImportSummary, IssueKind};

use crate::types::ImportReport;

pub fn print_summary(report: &ImportReport) {
    let summary = &report.summary;
    println!("Source: {}", report.source.display());
    println!("Target: {}", report.target);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Seen"), Cell::new(summary.seen)]);
    table.add_row(vec![
        Cell::new("Written"),
        count_cell(summary.succeeded, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Skipped"),
        count_cell(summary.skipped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        count_cell(summary.failed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate keys"),
        count_cell(summary.duplicate_keys, Color::Yellow),
    ]);
    println!("{table}");

    print_issue_table(summary, report.max_issues);
    if summary.has_issues() {
        println!(
            "Completed with {} skipped and {} failed rows.",
            summary.skipped, summary.failed
        );
    } else {
        println!("All {} rows imported.", summary.succeeded);
    }
}

fn print_issue_table(summary: &ImportSummary, limit: usize) {
    let issues = &summary.issues;
    let hidden = issues.len().saturating_sub(limit) + summary.issues_omitted;
    if issues.is_empty() || limit == 0 {
        if hidden > 0 {
            println!("{hidden} issues not shown");
        }
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Outcome"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in issues.iter().take(limit) {
        table.add_row(vec![
            Cell::new(issue.row),
            kind_cell(issue.kind),
            Cell::new(&issue.reason),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if hidden > 0 {
        println!("... {hidden} more not shown");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(kind: IssueKind) -> Cell {
    match kind {
        IssueKind::Skipped => Cell::new("SKIPPED").fg(Color::Yellow),
        IssueKind::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
