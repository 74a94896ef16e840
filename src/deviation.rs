//! Deviation classification against personal baselines
//!
//! Each row is scored independently with fixed per-signal rules. Heart
//! rate deviates on relative excursion, SpO2 only on drops, and the two
//! blood-pressure signals on absolute offsets. Severity is simply how
//! many signals fired in the same row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineRecord;
use crate::signal::{CanonicalSignal, ColumnMap};
use crate::table::{parse_numeric, SignalTable};

/// Relative heart-rate excursion that counts as a deviation
pub const HEART_RATE_RELATIVE_LIMIT: f64 = 0.15;
/// SpO2 drop below baseline that counts as a deviation (rises never do)
pub const SPO2_DROP_LIMIT: f64 = 2.0;
/// Absolute systolic offset that counts as a deviation
pub const SYSTOLIC_ABSOLUTE_LIMIT: f64 = 10.0;
/// Absolute diastolic offset that counts as a deviation
pub const DIASTOLIC_ABSOLUTE_LIMIT: f64 = 5.0;

/// One row that deviated, with every signal that fired in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviationEvent {
    /// 0-based data row index, header excluded
    pub row: usize,
    /// Signals that fired, in canonical order
    pub signals: Vec<CanonicalSignal>,
    /// Number of signals that fired (1..=4)
    pub severity: u32,
}

/// Apply one signal's deviation rule to a single observation
///
/// Comparisons are strict, so a value exactly on a limit does not fire.
/// The arithmetic follows IEEE semantics: a zero heart-rate baseline
/// makes the ratio infinite for nonzero values (fires) and NaN for zero
/// values (does not fire).
pub fn exceeds_limit(signal: CanonicalSignal, value: f64, baseline: f64) -> bool {
    match signal {
        CanonicalSignal::HeartRate => {
            (value - baseline).abs() / baseline > HEART_RATE_RELATIVE_LIMIT
        }
        CanonicalSignal::Spo2 => baseline - value > SPO2_DROP_LIMIT,
        CanonicalSignal::SystolicBp => (value - baseline).abs() > SYSTOLIC_ABSOLUTE_LIMIT,
        CanonicalSignal::DiastolicBp => (value - baseline).abs() > DIASTOLIC_ABSOLUTE_LIMIT,
    }
}

/// Scan every row and collect the ones that deviate
///
/// Rows come back in input order. A cell that is missing or non-numeric
/// simply cannot fire, and a signal without a baseline never participates.
pub fn detect_deviations(
    table: &SignalTable,
    mapping: &ColumnMap,
    baselines: &BTreeMap<CanonicalSignal, BaselineRecord>,
) -> Vec<DeviationEvent> {
    let mut events = Vec::new();

    for row in 0..table.row_count() {
        // Mapping iteration is keyed on the signal, so fired signals land
        // in canonical order without a separate sort.
        let mut fired = Vec::new();
        for (&signal, &column) in mapping {
            if let (Some(record), Some(value)) = (
                baselines.get(&signal),
                table.cell(row, column).and_then(parse_numeric),
            ) {
                if exceeds_limit(signal, value, record.median) {
                    fired.push(signal);
                }
            }
        }

        if !fired.is_empty() {
            events.push(DeviationEvent {
                row,
                severity: fired.len() as u32,
                signals: fired,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::estimate_baselines;
    use crate::signal::{resolve_columns, AliasTable};

    fn table(headers: &[&str], rows: &[&[&str]]) -> SignalTable {
        SignalTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn analyze(headers: &[&str], rows: &[&[&str]]) -> Vec<DeviationEvent> {
        let table = table(headers, rows);
        let mapping = resolve_columns(table.headers(), &AliasTable::default());
        let baselines = estimate_baselines(&table, &mapping);
        detect_deviations(&table, &mapping, &baselines)
    }

    #[test]
    fn test_heart_rate_fires_on_relative_excursion() {
        assert!(exceeds_limit(CanonicalSignal::HeartRate, 130.0, 100.0));
        assert!(exceeds_limit(CanonicalSignal::HeartRate, 84.0, 100.0));
        assert!(!exceeds_limit(CanonicalSignal::HeartRate, 114.0, 100.0));
    }

    #[test]
    fn test_heart_rate_boundary_is_exclusive() {
        // Exactly 15% above baseline stays quiet
        assert!(!exceeds_limit(CanonicalSignal::HeartRate, 115.0, 100.0));
        assert!(exceeds_limit(CanonicalSignal::HeartRate, 116.0, 100.0));
    }

    #[test]
    fn test_spo2_fires_only_on_drops() {
        assert!(exceeds_limit(CanonicalSignal::Spo2, 95.0, 98.0));
        assert!(!exceeds_limit(CanonicalSignal::Spo2, 96.0, 98.0));
        // A rise of any size never fires
        assert!(!exceeds_limit(CanonicalSignal::Spo2, 104.0, 98.0));
    }

    #[test]
    fn test_blood_pressure_absolute_offsets() {
        assert!(exceeds_limit(CanonicalSignal::SystolicBp, 131.0, 120.0));
        assert!(!exceeds_limit(CanonicalSignal::SystolicBp, 130.0, 120.0));
        assert!(exceeds_limit(CanonicalSignal::SystolicBp, 109.0, 120.0));

        assert!(exceeds_limit(CanonicalSignal::DiastolicBp, 86.0, 80.0));
        assert!(!exceeds_limit(CanonicalSignal::DiastolicBp, 85.0, 80.0));
        assert!(exceeds_limit(CanonicalSignal::DiastolicBp, 74.0, 80.0));
    }

    #[test]
    fn test_zero_heart_rate_baseline_follows_ieee() {
        assert!(exceeds_limit(CanonicalSignal::HeartRate, 5.0, 0.0));
        assert!(!exceeds_limit(CanonicalSignal::HeartRate, 0.0, 0.0));
    }

    #[test]
    fn test_flat_run_with_one_spike() {
        let rows: &[&[&str]] = &[&["100"], &["100"], &["100"], &["100"], &["130"]];
        let events = analyze(&["hr"], rows);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].row, 4);
        assert_eq!(events[0].severity, 1);
        assert_eq!(events[0].signals, vec![CanonicalSignal::HeartRate]);
    }

    #[test]
    fn test_severity_counts_fired_signals() {
        let rows: &[&[&str]] = &[
            &["100", "98", "120", "80"],
            &["100", "98", "120", "80"],
            &["100", "98", "120", "80"],
            &["140", "94", "135", "90"],
        ];
        let events = analyze(&["hr", "spo2", "sys", "dia"], rows);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, 4);
        assert_eq!(events[0].signals, CanonicalSignal::ALL.to_vec());
    }

    #[test]
    fn test_fired_signals_follow_canonical_order() {
        // Columns deliberately reversed relative to canonical order
        let rows: &[&[&str]] = &[
            &["80", "120", "98", "100"],
            &["80", "120", "98", "100"],
            &["80", "120", "98", "100"],
            &["90", "135", "94", "140"],
        ];
        let events = analyze(&["dia", "sys", "spo2", "hr"], rows);

        assert_eq!(
            events[0].signals,
            vec![
                CanonicalSignal::HeartRate,
                CanonicalSignal::Spo2,
                CanonicalSignal::SystolicBp,
                CanonicalSignal::DiastolicBp,
            ]
        );
    }

    #[test]
    fn test_spo2_drop_beyond_two_points() {
        let rows: &[&[&str]] = &[&["98"], &["98"], &["98"], &["95"]];
        let events = analyze(&["spo2"], rows);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].row, 3);
        assert_eq!(events[0].signals, vec![CanonicalSignal::Spo2]);
    }

    #[test]
    fn test_events_preserve_row_order() {
        let rows: &[&[&str]] = &[
            &["130"],
            &["100"],
            &["100"],
            &["100"],
            &["100"],
            &["70"],
        ];
        let events = analyze(&["hr"], rows);

        let indices: Vec<usize> = events.iter().map(|e| e.row).collect();
        assert_eq!(indices, vec![0, 5]);
    }

    #[test]
    fn test_missing_cell_cannot_fire() {
        let rows: &[&[&str]] = &[&["100"], &["100"], &["100"], &[""], &["130"]];
        let events = analyze(&["hr"], rows);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].row, 4);
    }

    #[test]
    fn test_signal_without_baseline_never_participates() {
        let table = table(&["hr"], &[&["130"]]);
        let mapping = resolve_columns(table.headers(), &AliasTable::default());
        // No baselines at all, so even a wild value stays quiet
        let events = detect_deviations(&table, &mapping, &BTreeMap::new());

        assert!(events.is_empty());
    }

    #[test]
    fn test_quiet_recording_yields_no_events() {
        let rows: &[&[&str]] = &[&["72", "98"], &["73", "98"], &["74", "97"]];
        assert!(analyze(&["hr", "spo2"], rows).is_empty());
    }
}
