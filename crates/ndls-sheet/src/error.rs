//! Error types for table reading, updating, and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a spreadsheet run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// The input table lacks a required column. Raised before any service
    /// call is made.
    #[error("missing required column {column} in {path}")]
    MissingColumn {
        /// The column that was expected.
        column: String,
        /// The offending input file.
        path: PathBuf,
    },

    /// The input table could not be read or parsed.
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The output table could not be written.
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// I/O failure outside the CSV layer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;
