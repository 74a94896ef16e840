//! CSV output format for deviation reports
//!
//! One row per deviation event, for spreadsheet analysis and machine
//! parsing. Baselines and summary counters live in the JSON and text
//! formats; the CSV carries just the event table.

use crate::report::{join_signals, Report};

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    // If field contains comma, quote, or newline, wrap in quotes and escape quotes
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the report's deviation events as CSV
pub fn to_csv(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("row,signals,severity\n");

    for event in &report.deviations {
        let fields = [
            event.row.to_string(),
            escape_field(&join_signals(&event.signals)),
            event.severity.to_string(),
        ];
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}
