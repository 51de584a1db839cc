use std::path::{Path, PathBuf};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rpt_cli::types::{BatchResult, JobOutcome};
use rpt_model::ValidationReport;

pub fn print_batch_summary(result: &BatchResult) {
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Template"),
        header_cell("Output"),
        header_cell("Warnings"),
        header_cell("Validation"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for outcome in &result.jobs {
        table.add_row(vec![
            source_cell(outcome),
            optional_cell(outcome.template.as_deref()),
            outcome
                .output
                .as_deref()
                .map_or_else(|| dim_cell("-"), |path| Cell::new(file_name(path))),
            count_cell(Some(outcome.warnings.len()), Color::Yellow),
            validation_cell(outcome),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} ok, {} failed", result.succeeded(), result.failed()))
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(
            Some(result.jobs.iter().map(|job| job.warnings.len()).sum()),
            Color::Yellow,
        )
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    let failures: Vec<&JobOutcome> = result.jobs.iter().filter(|job| job.error.is_some()).collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for job in failures {
            if let Some(error) = &job.error {
                eprintln!("- {}: {error}", job.job.display());
            }
        }
    }
}

pub fn print_validation_summary(results: &[(PathBuf, ValidationReport)]) {
    if results.is_empty() {
        println!("No design files found.");
        return;
    }
    for (path, report) in results {
        if report.total_issues() == 0 {
            continue;
        }
        println!("{}", path.display());
        for message in &report.errors {
            println!("  ERROR {message}");
        }
        for message in &report.warnings {
            println!("  WARN  {message}");
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for (path, report) in results {
        total_errors += report.error_count();
        total_warnings += report.warning_count();
        table.add_row(vec![
            Cell::new(file_name(path)),
            status_cell(report.is_success()),
            count_cell(Some(report.error_count()), Color::Red),
            count_cell(Some(report.warning_count()), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn source_cell(outcome: &JobOutcome) -> Cell {
    match &outcome.source {
        Some(source) => Cell::new(source)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => Cell::new(file_name(&outcome.job)).fg(Color::DarkGrey),
    }
}

fn validation_cell(outcome: &JobOutcome) -> Cell {
    if outcome.error.is_some() {
        return Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold);
    }
    match &outcome.validation {
        Some(report) => status_cell(report.is_success()),
        None => dim_cell("-"),
    }
}

fn status_cell(success: bool) -> Cell {
    if success {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
