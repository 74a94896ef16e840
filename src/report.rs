//! Report aggregation and the plain-text renderer
//!
//! The report is a pure reduction over the estimator and classifier
//! outputs. Rendering rounds values for display; the underlying report
//! keeps full precision.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineRecord;
use crate::deviation::DeviationEvent;
use crate::signal::CanonicalSignal;

/// Disclaimer attached to every rendered report
pub const DISCLAIMER: &str = "For research / exploratory use only. Not a medical device. \
     Not diagnostic. No clinical claims.";

/// Whole-recording roll-up counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Data rows in the input, header excluded
    pub total_rows: usize,
    /// Rows with at least one fired signal
    pub deviation_rows: usize,
    /// Highest severity seen, 0 when nothing fired
    pub max_severity: u32,
    /// Rows where two or more signals fired together
    pub multi_signal: usize,
}

/// Complete analysis result for one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub baselines: BTreeMap<CanonicalSignal, BaselineRecord>,
    pub deviations: Vec<DeviationEvent>,
    pub summary: ReportSummary,
}

/// Fold baselines and events into the final report
pub fn build_report(
    total_rows: usize,
    baselines: BTreeMap<CanonicalSignal, BaselineRecord>,
    deviations: Vec<DeviationEvent>,
) -> Report {
    let summary = ReportSummary {
        total_rows,
        deviation_rows: deviations.len(),
        max_severity: deviations.iter().map(|e| e.severity).max().unwrap_or(0),
        multi_signal: deviations.iter().filter(|e| e.severity >= 2).count(),
    };

    Report {
        baselines,
        deviations,
        summary,
    }
}

/// Join an event's signals for display
pub fn join_signals(signals: &[CanonicalSignal]) -> String {
    signals
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the report as plain text
///
/// Values are shown rounded to two decimals.
pub fn render_text(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("Signal Deviation Report\n");
    output.push_str("=======================\n\n");

    output.push_str("Baselines\n");
    output.push_str("---------\n");
    if report.baselines.is_empty() {
        output.push_str("No signals resolved.\n");
    } else {
        output.push_str(&format!(
            "{:<14} {:>10} {:>12} {:>9}\n",
            "Signal", "Median", "Volatility", "Samples"
        ));
        for (signal, record) in &report.baselines {
            output.push_str(&format!(
                "{:<14} {:>10.2} {:>12.2} {:>9}\n",
                signal.as_str(),
                record.median,
                record.volatility,
                record.samples
            ));
        }
    }
    output.push('\n');

    output.push_str("Deviation Events\n");
    output.push_str("----------------\n");
    if report.deviations.is_empty() {
        output.push_str("No deviations detected.\n");
    } else {
        output.push_str(&format!(
            "{:>6} {:<42} {:>8}\n",
            "Row", "Signals", "Severity"
        ));
        for event in &report.deviations {
            output.push_str(&format!(
                "{:>6} {:<42} {:>8}\n",
                event.row,
                join_signals(&event.signals),
                event.severity
            ));
        }
    }
    output.push('\n');

    output.push_str("Summary\n");
    output.push_str("-------\n");
    output.push_str(&format!(
        "Total rows:          {}\n",
        report.summary.total_rows
    ));
    output.push_str(&format!(
        "Deviation rows:      {}\n",
        report.summary.deviation_rows
    ));
    output.push_str(&format!(
        "Max severity:        {}\n",
        report.summary.max_severity
    ));
    output.push_str(&format!(
        "Multi-signal events: {}\n",
        report.summary.multi_signal
    ));

    output.push('\n');
    output.push_str(DISCLAIMER);
    output.push('\n');

    output
}
