//! Error types for the data-loader crate.
//!
//! Malformed rows are not errors: they are dropped during coercion and only
//! counted in the logs. Everything here is fatal to engine initialization.

use thiserror::Error;

/// Errors that can occur while loading the catalog or the ratings table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is missing after both the named and the
    /// positional parse attempts
    #[error("Missing required column: {column} in {file}")]
    SchemaError { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
