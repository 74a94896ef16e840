//! Signal filtering for -e signals= expressions
//!
//! Supports:
//! - Individual signals: -e signals=heart_rate,spo2
//! - Signal classes: -e signals=bp (both blood-pressure signals)

use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::signal::CanonicalSignal;

/// Signal filter that determines which resolved signals to analyze
#[derive(Debug, Clone)]
pub struct SignalFilter {
    /// Set of signals to include (None = all signals)
    include: Option<HashSet<CanonicalSignal>>,
}

impl SignalFilter {
    /// Create a filter that includes all signals
    pub fn all() -> Self {
        Self { include: None }
    }

    /// Parse a filter expression like "signals=heart_rate,spo2" or "signals=bp"
    pub fn from_expr(expr: &str) -> Result<Self> {
        if let Some(signal_spec) = expr.strip_prefix("signals=") {
            Self::from_signal_spec(signal_spec)
        } else {
            bail!(
                "Invalid filter expression: {}. Expected format: signals=SPEC",
                expr
            );
        }
    }

    /// Parse a signal specification (the part after "signals=")
    fn from_signal_spec(spec: &str) -> Result<Self> {
        let mut signals = HashSet::new();

        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            match part {
                // Both blood-pressure signals
                "bp" => {
                    signals.insert(CanonicalSignal::SystolicBp);
                    signals.insert(CanonicalSignal::DiastolicBp);
                }
                _ => match CanonicalSignal::from_name(part) {
                    Some(signal) => {
                        signals.insert(signal);
                    }
                    None => {
                        bail!(
                            "Unknown signal: {}. Valid signals: heart_rate, spo2, \
                             systolic_bp, diastolic_bp (or the bp class)",
                            part
                        );
                    }
                },
            }
        }

        Ok(Self {
            include: Some(signals),
        })
    }

    /// Check if a signal should be analyzed
    pub fn includes(&self, signal: CanonicalSignal) -> bool {
        match &self.include {
            None => true, // No filter = analyze all
            Some(set) => set.contains(&signal),
        }
    }
}
