//! Error types shared by both pipelines.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Failure while reading, normalizing, or writing a data file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open \"{path}\": {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot create \"{path}\": {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("I/O error on \"{path}\": {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed CSV in {origin}: {source}")]
    Csv { origin: String, source: csv::Error },

    #[error("column \"{column}\" not found in {origin} (available: {available})")]
    MissingColumn {
        origin: String,
        column: String,
        available: String,
    },

    #[error("column \"{column}\" has no value for its first {rows} row(s) and cannot be forward-filled")]
    LeadingGap { column: String, rows: usize },

    #[error("invalid month code in \"{value}\" at row {row}")]
    MonthCode { row: usize, value: String },

    #[error("{month} appears more than once in the monthly data")]
    DuplicateMonth { month: &'static str },

    #[error("expected {expected} monthly rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("non-numeric value \"{value}\" in column \"{column}\" at row {row}")]
    MonthlyValue {
        row: usize,
        column: String,
        value: String,
    },
}

/// Failure while deriving scaled monthly estimates.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("reference {metric} sums to zero, monthly shares are undefined")]
    ZeroReferenceTotal { metric: &'static str },

    #[error("reference {metric} needs 12 monthly values, got {found}")]
    MonthCount { metric: &'static str, found: usize },
}

/// Top-level error returned by the pipeline entry points.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
