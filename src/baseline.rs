//! Personal baseline estimation
//!
//! Each resolved signal gets a baseline from its own recording: the median
//! of the column's finite values, plus an interquartile-range volatility.
//! Medians resist the very excursions the classifier is looking for, so a
//! handful of deviant rows does not drag the reference along with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::signal::{CanonicalSignal, ColumnMap};
use crate::stats::percentile;
use crate::table::{parse_numeric, SignalTable};

/// Floor for the volatility when the quartiles collapse
///
/// A perfectly flat column has IQR 0; clamping keeps the stored spread
/// strictly positive so downstream ratio math stays finite.
pub const VOLATILITY_EPSILON: f64 = 1e-6;

/// Baseline for one signal: reference level plus observed spread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    /// Median of the signal's finite values
    pub median: f64,
    /// Interquartile range, clamped to at least `VOLATILITY_EPSILON`
    pub volatility: f64,
    /// Number of finite values the estimate is built on
    pub samples: usize,
}

/// Finite values of one column, in row order
pub fn collect_numeric(table: &SignalTable, column: usize) -> Vec<f64> {
    table.column(column).filter_map(parse_numeric).collect()
}

/// Estimate baselines for every resolved signal
///
/// A signal whose column holds no finite values gets no baseline and is
/// silently excluded from classification. An empty table yields an empty
/// map.
pub fn estimate_baselines(
    table: &SignalTable,
    mapping: &ColumnMap,
) -> BTreeMap<CanonicalSignal, BaselineRecord> {
    let mut baselines = BTreeMap::new();

    for (&signal, &column) in mapping {
        let mut values = collect_numeric(table, column);
        if values.is_empty() {
            continue;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&values, 25.0);
        let q3 = percentile(&values, 75.0);
        let record = BaselineRecord {
            median: percentile(&values, 50.0),
            volatility: (q3 - q1).max(VOLATILITY_EPSILON),
            samples: values.len(),
        };
        tracing::debug!(
            signal = %signal,
            median = record.median,
            volatility = record.volatility,
            samples = record.samples,
            "estimated baseline"
        );
        baselines.insert(signal, record);
    }

    baselines
}
