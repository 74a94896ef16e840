//! One-shot analysis pipeline
//!
//! Resolution, baseline estimation, classification and aggregation run
//! as a single stateless pass over an in-memory table. Nothing is cached
//! between runs; analyzing the same table twice yields the same report.

use std::path::Path;

use crate::baseline::{collect_numeric, estimate_baselines};
use crate::deviation::detect_deviations;
use crate::filter::SignalFilter;
use crate::report::{build_report, Report};
use crate::signal::{resolve_columns, AliasTable, ColumnMap};
use crate::stats::SignalStats;
use crate::table::{SignalTable, TableError};

/// Knobs for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Alias table used to resolve headers
    pub aliases: AliasTable,
    /// Which resolved signals participate in the analysis
    pub filter: SignalFilter,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            aliases: AliasTable::default(),
            filter: SignalFilter::all(),
        }
    }
}

/// Result of one run: the resolved mapping plus the report built from it
#[derive(Debug, Clone)]
pub struct Analysis {
    pub mapping: ColumnMap,
    pub report: Report,
}

/// Analyze an in-memory table
///
/// Never fails: degenerate inputs (no rows, no resolvable headers, no
/// numeric cells) produce a valid report with zero counters.
pub fn analyze_table(table: &SignalTable, config: &AnalyzerConfig) -> Analysis {
    let mut mapping = resolve_columns(table.headers(), &config.aliases);
    mapping.retain(|signal, _| config.filter.includes(*signal));
    tracing::debug!(signals = mapping.len(), "resolved signal columns");

    let baselines = estimate_baselines(table, &mapping);
    tracing::debug!(baselines = baselines.len(), "estimated baselines");

    let deviations = detect_deviations(table, &mapping, &baselines);
    tracing::debug!(events = deviations.len(), "classified deviations");

    Analysis {
        mapping,
        report: build_report(table.row_count(), baselines, deviations),
    }
}

/// Load a CSV recording from disk and analyze it
pub fn analyze_file(path: &Path, config: &AnalyzerConfig) -> Result<Analysis, TableError> {
    let table = SignalTable::from_csv_path(path)?;
    Ok(analyze_table(&table, config))
}

/// Extended statistics for every signal in the mapping, in canonical order
pub fn collect_extended_stats(table: &SignalTable, mapping: &ColumnMap) -> Vec<SignalStats> {
    mapping
        .iter()
        .map(|(&signal, &column)| SignalStats::from_values(signal, &collect_numeric(table, column)))
        .collect()
}
