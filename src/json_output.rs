//! JSON output format for deviation reports
//!
//! Machine-readable envelope around the report, versioned so downstream
//! consumers can detect format changes. Values keep full precision here;
//! rounding is a display concern of the text and HTML formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineRecord;
use crate::deviation::DeviationEvent;
use crate::report::{Report, ReportSummary};
use crate::signal::CanonicalSignal;

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Per-signal baselines keyed by canonical name
    pub baselines: BTreeMap<CanonicalSignal, BaselineRecord>,
    /// Deviation events in row order
    pub deviations: Vec<DeviationEvent>,
    /// Whole-recording counters
    pub summary: ReportSummary,
}

impl JsonReport {
    /// Build the JSON envelope from a finished report
    pub fn from_report(report: &Report) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "desviar-json-v1".to_string(),
            baselines: report.baselines.clone(),
            deviations: report.deviations.clone(),
            summary: report.summary,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
