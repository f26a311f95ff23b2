//! Error types for the TACE library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for TACE operations.
#[derive(Debug, Error)]
pub enum TaceError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no cells to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A month grid cannot be aggregated (too few rows, no working-day slot).
    #[error("Insufficient data for '{month}': {reason}")]
    InsufficientData { month: String, reason: String },

    /// Every month of a workbook was excluded.
    #[error("No valid month found")]
    NoValidMonth,

    /// Label is not "<FrenchMonthName> <year>".
    #[error("Invalid month label: '{0}'")]
    InvalidMonthLabel(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for TACE operations.
pub type Result<T> = std::result::Result<T, TaceError>;
