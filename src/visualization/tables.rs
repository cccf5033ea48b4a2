use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table,
};

use crate::analysis::ForecastReport;
use crate::io::UrrTable;

/// Format the fitted-parameters table as a string.
pub fn format_fit_table(report: &ForecastReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Fitted Model Parameters".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Model", "Parameter", "Value"]);

    table.add_row(vec![
        Cell::new("Hubbert"),
        Cell::new("URR (fixed)"),
        Cell::new(format!("{:.1} {}", report.hubbert.urr, report.unit)),
    ]);
    table.add_row(vec![
        Cell::new("Hubbert"),
        Cell::new("Steepness"),
        Cell::new(format!("{:.5}", report.hubbert.steepness)),
    ]);
    table.add_row(vec![
        Cell::new("Hubbert"),
        Cell::new("Peak year"),
        Cell::new(format!("{:.0}", report.hubbert.peak_time)),
    ]);
    table.add_row(vec![
        Cell::new("Laherrère"),
        Cell::new("Peak production"),
        Cell::new(format!(
            "{:.2} {}/year",
            report.laherrere.peak_production, report.unit
        )),
    ]);
    table.add_row(vec![
        Cell::new("Laherrère"),
        Cell::new("Peak year"),
        Cell::new(format!("{:.0}", report.laherrere.tm)),
    ]);
    table.add_row(vec![
        Cell::new("Laherrère"),
        Cell::new("Width (c)"),
        Cell::new(format!("{:.1}", report.laherrere.c)),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the fitted-parameters table.
pub fn print_fit_table(report: &ForecastReport) {
    println!("{}", format_fit_table(report));
}

/// Format the cumulative-extraction table as a string.
pub fn format_cumulative_table(report: &ForecastReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Cumulative Extraction to 2100".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Model", "Cumulative", "% of URR"]);

    for (model, cumulative) in [
        ("Hubbert", report.hubbert_cumulative),
        ("Laherrère", report.laherrere_cumulative),
    ] {
        let pct = if report.urr > 0.0 {
            cumulative / report.urr * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(model),
            Cell::new(format!("{:.2} {}", cumulative, report.unit)),
            Cell::new(format!("{pct:.1}%")),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the cumulative-extraction table.
pub fn print_cumulative_table(report: &ForecastReport) {
    println!("{}", format_cumulative_table(report));
}

/// Format the available URR estimates as a string.
pub fn format_estimates_table(table_data: &UrrTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Available URR Estimates".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Estimate", "Value"]);

    for estimate in table_data.estimates() {
        table.add_row(vec![
            Cell::new(&estimate.estimate),
            Cell::new(format!("{:.1}", estimate.value)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the available URR estimates.
pub fn print_estimates_table(table_data: &UrrTable) {
    println!("{}", format_estimates_table(table_data));
}
