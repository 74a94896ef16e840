//! In-memory observation table and CSV ingestion
//!
//! The analyzer operates on an already-materialized table of raw cells;
//! this module provides that table plus the adapter that reads one out of
//! a CSV file. Cells stay raw strings — coercion to numbers happens
//! per-value through `parse_numeric`, and a cell that fails to coerce
//! counts as missing data, never as an error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors raised by the ingestion adapter, before analysis starts
///
/// The analysis pipeline itself is infallible; anything that goes wrong
/// with an upload surfaces here.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("input has no header row")]
    NoHeader,
}

/// A parsed tabular dataset: named columns over rows of raw cells
///
/// Rows are identified by their 0-based position in input order. Fields
/// holding anything other than a finite number are treated as missing
/// when a column is coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SignalTable {
    /// Build a table from already-parsed headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a table from a CSV file on disk
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Read a table from any CSV byte stream
    ///
    /// The first record is the header row; records with inconsistent field
    /// counts are rejected. A header row with zero data rows is a valid
    /// (empty) table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.is_empty() {
            return Err(TableError::NoHeader);
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Column headers, in table order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw cell at (row, column), if present
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Raw cells of one column, top to bottom
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column).map(String::as_str))
    }
}

/// Coerce a raw cell to a finite number
///
/// Total over all inputs: trims surrounding whitespace, parses as f64 and
/// returns None for anything that is not a finite number — empty cells,
/// free text, NaN and ±inf spellings alike.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
