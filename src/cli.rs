//! CLI argument parsing for Desviar

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for deviation reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// Self-contained HTML report
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "desviar")]
#[command(version)]
#[command(about = "Personal-baseline deviation analysis for vital-sign recordings", long_about = None)]
pub struct Cli {
    /// CSV recording to analyze
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Filter signals to analyze (e.g., -e signals=heart_rate,spo2 or -e signals=bp)
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print extended per-signal statistics to stderr
    #[arg(long = "stats-extended")]
    pub stats_extended: bool,

    /// Enable debug logging
    #[arg(long = "debug")]
    pub debug: bool,
}
