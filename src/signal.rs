//! Canonical signal identifiers and source-column resolution
//!
//! Uploaded recordings name their columns freely ("HR", "Heart Rate",
//! "sbp", ...). This module maps those headers onto the fixed set of
//! signals the analyzer understands, via a case-insensitive,
//! whitespace-trimming alias table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of physiological signals the analyzer understands
///
/// Declaration order is the canonical order: triggered signals inside a
/// deviation event and rows of the baseline table always follow it,
/// independent of how the source columns were arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalSignal {
    HeartRate,
    Spo2,
    SystolicBp,
    DiastolicBp,
}

impl CanonicalSignal {
    /// All signals in canonical order
    pub const ALL: [CanonicalSignal; 4] = [
        CanonicalSignal::HeartRate,
        CanonicalSignal::Spo2,
        CanonicalSignal::SystolicBp,
        CanonicalSignal::DiastolicBp,
    ];

    /// Canonical snake_case name, as it appears in report tables
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalSignal::HeartRate => "heart_rate",
            CanonicalSignal::Spo2 => "spo2",
            CanonicalSignal::SystolicBp => "systolic_bp",
            CanonicalSignal::DiastolicBp => "diastolic_bp",
        }
    }

    /// Parse a canonical name back to a signal
    pub fn from_name(name: &str) -> Option<CanonicalSignal> {
        match name {
            "heart_rate" => Some(CanonicalSignal::HeartRate),
            "spo2" => Some(CanonicalSignal::Spo2),
            "systolic_bp" => Some(CanonicalSignal::SystolicBp),
            "diastolic_bp" => Some(CanonicalSignal::DiastolicBp),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted header spellings per canonical signal
///
/// Pure configuration data handed to `resolve_columns`, not process-wide
/// state. `AliasTable::default()` carries the built-in spellings; callers
/// with unusual export formats can extend it with `add_alias`.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: BTreeMap<CanonicalSignal, Vec<String>>,
}

impl AliasTable {
    /// Accepted spellings for `signal`, in trimmed lower-case form
    pub fn aliases_for(&self, signal: CanonicalSignal) -> &[String] {
        self.entries.get(&signal).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register an extra accepted spelling for `signal`
    ///
    /// The alias is normalized (trimmed, lower-cased) before storage, so
    /// matching stays case-insensitive.
    pub fn add_alias(&mut self, signal: CanonicalSignal, alias: &str) {
        self.entries
            .entry(signal)
            .or_default()
            .push(alias.trim().to_lowercase());
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            CanonicalSignal::HeartRate,
            to_owned(&["hr", "heart rate", "heartrate", "heart_rate"]),
        );
        entries.insert(
            CanonicalSignal::Spo2,
            to_owned(&["spo2", "sp02", "oxygen", "blood oxygen", "o2"]),
        );
        entries.insert(
            CanonicalSignal::SystolicBp,
            to_owned(&["sys", "systolic", "systolic bp", "sbp"]),
        );
        entries.insert(
            CanonicalSignal::DiastolicBp,
            to_owned(&["dia", "diastolic", "diastolic bp", "dbp"]),
        );
        Self { entries }
    }
}

fn to_owned(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|a| a.to_string()).collect()
}

/// Resolved signal -> source column index mapping
///
/// At most one column per signal; read-only after construction. Iteration
/// follows canonical signal order regardless of header arrangement.
pub type ColumnMap = BTreeMap<CanonicalSignal, usize>;

/// Resolve table headers to canonical signals
///
/// For each signal the headers are scanned in table order and the first
/// header whose trimmed, lower-cased text matches one of the signal's
/// aliases wins; later matching columns are ignored. A signal with no
/// matching header is simply absent from the mapping — not an error.
pub fn resolve_columns(headers: &[String], aliases: &AliasTable) -> ColumnMap {
    let mut mapping = ColumnMap::new();

    for signal in CanonicalSignal::ALL {
        let accepted = aliases.aliases_for(signal);
        let hit = headers.iter().position(|header| {
            let normalized = header.trim().to_lowercase();
            accepted.iter().any(|alias| *alias == normalized)
        });

        if let Some(column) = hit {
            mapping.insert(signal, column);
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolves_all_four_signals() {
        let h = headers(&["timestamp", "hr", "spo2", "sys", "dia"]);
        let mapping = resolve_columns(&h, &AliasTable::default());

        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping[&CanonicalSignal::HeartRate], 1);
        assert_eq!(mapping[&CanonicalSignal::Spo2], 2);
        assert_eq!(mapping[&CanonicalSignal::SystolicBp], 3);
        assert_eq!(mapping[&CanonicalSignal::DiastolicBp], 4);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_trims() {
        for header in [" HR ", "hr", "Heart Rate", "HEARTRATE"] {
            let mapping = resolve_columns(&headers(&[header]), &AliasTable::default());
            assert_eq!(
                mapping.get(&CanonicalSignal::HeartRate),
                Some(&0),
                "{header:?} should resolve to heart_rate"
            );
        }
    }

    #[test]
    fn test_first_matching_header_wins() {
        let h = headers(&["hr", "heart rate", "heartrate"]);
        let mapping = resolve_columns(&h, &AliasTable::default());
        assert_eq!(mapping[&CanonicalSignal::HeartRate], 0);
    }

    #[test]
    fn test_unmatched_signal_absent_from_mapping() {
        let h = headers(&["hr", "temperature", "notes"]);
        let mapping = resolve_columns(&h, &AliasTable::default());

        assert!(mapping.contains_key(&CanonicalSignal::HeartRate));
        assert!(!mapping.contains_key(&CanonicalSignal::Spo2));
        assert!(!mapping.contains_key(&CanonicalSignal::SystolicBp));
        assert!(!mapping.contains_key(&CanonicalSignal::DiastolicBp));
    }

    #[test]
    fn test_no_headers_yields_empty_mapping() {
        let mapping = resolve_columns(&[], &AliasTable::default());
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_mapping_iterates_in_canonical_order() {
        // Columns deliberately arranged against canonical order
        let h = headers(&["dbp", "sbp", "o2", "hr"]);
        let mapping = resolve_columns(&h, &AliasTable::default());

        let order: Vec<CanonicalSignal> = mapping.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                CanonicalSignal::HeartRate,
                CanonicalSignal::Spo2,
                CanonicalSignal::SystolicBp,
                CanonicalSignal::DiastolicBp,
            ]
        );
    }

    #[test]
    fn test_custom_alias_resolves() {
        let mut aliases = AliasTable::default();
        aliases.add_alias(CanonicalSignal::HeartRate, " Pulse ");

        let mapping = resolve_columns(&headers(&["pulse"]), &aliases);
        assert_eq!(mapping.get(&CanonicalSignal::HeartRate), Some(&0));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let h = headers(&["HR", "SpO2", "Systolic BP", "Diastolic BP"]);
        let a = resolve_columns(&h, &AliasTable::default());
        let b = resolve_columns(&h, &AliasTable::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_name_round_trip() {
        for signal in CanonicalSignal::ALL {
            assert_eq!(CanonicalSignal::from_name(signal.as_str()), Some(signal));
        }
        assert_eq!(CanonicalSignal::from_name("pulse"), None);
    }

    #[test]
    fn test_signal_serializes_to_snake_case() {
        let json = serde_json::to_string(&CanonicalSignal::SystolicBp).unwrap();
        assert_eq!(json, "\"systolic_bp\"");
    }
}
