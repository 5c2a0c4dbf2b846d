//! Error types for the common WRF value types.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Invalid grid parameters: {0}")]
    InvalidGridParameters(String),
}
