//! Per-signal summary statistics
//!
//! Baseline estimation needs only the median and quartiles, computed in
//! f64 over the coerced column. The extended summary behind
//! `--stats-extended` adds the remaining moments, SIMD-accelerated via
//! Trueno.

use crate::signal::CanonicalSignal;
use trueno::Vector;

/// Calculate a percentile from sorted data using linear interpolation
///
/// The rank is `pct / 100 * (n - 1)`; values between ranks interpolate
/// linearly. An empty slice yields 0.0.
pub fn percentile(sorted_data: &[f64], pct: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let max_index = (sorted_data.len() - 1) as f64;
    let index = ((pct / 100.0) * max_index).clamp(0.0, max_index);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Extended statistics for one resolved signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStats {
    pub signal: CanonicalSignal,
    pub samples: usize,
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32, // P50
    pub p75: f32,
    pub p90: f32,
    pub p95: f32,
    pub p99: f32,
}

impl SignalStats {
    /// Compute extended statistics for one signal's finite observations
    pub fn from_values(signal: CanonicalSignal, values: &[f64]) -> Self {
        // Narrow to f32 for Trueno
        let narrowed: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        let v = Vector::from_slice(&narrowed);

        let mean = v.mean().unwrap_or(0.0);
        let stddev = v.stddev().unwrap_or(0.0);
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        // Percentiles stay in f64 (Trueno doesn't have a built-in percentile)
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            signal,
            samples: values.len(),
            mean,
            stddev,
            min,
            max,
            median: percentile(&sorted, 50.0) as f32,
            p75: percentile(&sorted, 75.0) as f32,
            p90: percentile(&sorted, 90.0) as f32,
            p95: percentile(&sorted, 95.0) as f32,
            p99: percentile(&sorted, 99.0) as f32,
        }
    }
}

/// Print the extended per-signal summary to stderr
///
/// Stderr keeps stdout clean for the report itself.
pub fn print_extended_summary(stats: &[SignalStats]) {
    if stats.is_empty() {
        eprintln!("No signals resolved.");
        return;
    }

    eprintln!("\n=== Extended Statistics (SIMD-accelerated via Trueno) ===\n");

    for entry in stats {
        eprintln!("{} ({} samples):", entry.signal.as_str(), entry.samples);
        eprintln!("  Mean:         {:.2}", entry.mean);
        eprintln!("  Std Dev:      {:.2}", entry.stddev);
        eprintln!("  Min:          {:.2}", entry.min);
        eprintln!("  Max:          {:.2}", entry.max);
        eprintln!("  Median (P50): {:.2}", entry.median);
        eprintln!("  P75:          {:.2}", entry.p75);
        eprintln!("  P90:          {:.2}", entry.p90);
        eprintln!("  P95:          {:.2}", entry.p95);
        eprintln!("  P99:          {:.2}", entry.p99);
        eprintln!();
    }
}
