//! Error types for projection operations.

use thiserror::Error;

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Error, Debug)]
pub enum ProjectionError {
    /// Projection parameters that do not define a usable projection
    #[error("Invalid projection parameters: {0}")]
    InvalidParameters(String),

    /// Coordinate arrays with differing shapes
    #[error("Coordinate arrays differ in shape: x is {x:?}, y is {y:?}")]
    ShapeMismatch { x: (usize, usize), y: (usize, usize) },
}
