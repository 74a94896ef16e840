//! Desviar - Personal-baseline deviation analysis for vital-sign recordings
//!
//! This library provides the core pipeline for analyzing a tabular
//! vital-sign recording against its own baselines: header resolution,
//! median/IQR baseline estimation, fixed-rule deviation classification and
//! report aggregation, plus text, JSON, CSV and HTML renderers.

pub mod analyzer;
pub mod baseline;
pub mod cli;
pub mod csv_output;
pub mod deviation;
pub mod filter;
pub mod html_output;
pub mod json_output;
pub mod report;
pub mod signal;
pub mod stats;
pub mod table;
