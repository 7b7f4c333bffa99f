//! Error types for the data-loader crate.
//!
//! Two tiers of failure exist while loading a catalog:
//! - structural problems (a file can't be read, a required column is
//!   missing) abort the load and surface as [`DataLoadError`];
//! - per-row problems (bad id, malformed nested field) are counted in the
//!   [`LoadReport`](crate::types::LoadReport) and the row is dropped.

use thiserror::Error;

/// Errors that can occur during catalog loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader failed in a way that isn't local to one record
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the loader depends on is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A nested literal field couldn't be parsed
    ///
    /// `position` is a character offset into the field text.
    #[error("Literal parse error at position {position}: {reason}")]
    LiteralError { position: usize, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
