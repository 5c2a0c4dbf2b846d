//! Error types for WRF dataset access.

use thiserror::Error;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error types for reading WRF output.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Global attribute not present
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    /// Variable not present
    #[error("Missing variable: {0}")]
    MissingVariable(String),

    /// Data present but not in the expected layout
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Requested time step beyond the Time dimension
    #[error("Time index {index} out of range for {variable} with {len} time steps")]
    TimeIndexOutOfRange {
        variable: String,
        index: usize,
        len: usize,
    },

    /// Malformed JSON dataset dump
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
