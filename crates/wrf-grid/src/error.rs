//! Error types for grid reconstruction.

use thiserror::Error;
use wrf_common::{CommonError, MapProjection};
use wrf_dataset::DatasetError;

use projection::ProjectionError;

use crate::stats::StatsError;

/// Errors that can occur while reproducing a WRF grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// The dataset uses a projection other than Lambert Conformal Conic.
    #[error("unsupported projection {projection}: only MAP_PROJ={expected} (Lambert Conformal Conic) is supported")]
    UnsupportedProjectionKind {
        projection: MapProjection,
        expected: i64,
    },

    /// A projection or grid attribute is absent.
    #[error("missing grid metadata: {0}")]
    MissingGridMetadata(String),

    /// A longitude/latitude variable is absent.
    #[error("missing coordinate field: {0}")]
    MissingCoordinateField(String),

    /// Grid metadata that cannot describe a grid.
    #[error("invalid grid parameters: {0}")]
    InvalidGridParameters(String),

    /// Two arrays that must line up do not.
    #[error("shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Any other dataset failure.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Projection construction failure.
    #[error("projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Statistics on malformed input.
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridError {
    /// Map a dataset error raised while reading grid metadata.
    pub fn from_metadata(err: DatasetError) -> Self {
        match err {
            DatasetError::MissingAttribute(name) => Self::MissingGridMetadata(name),
            other => Self::Dataset(other),
        }
    }

    /// Map a dataset error raised while reading a coordinate field.
    pub fn from_coordinate_field(err: DatasetError) -> Self {
        match err {
            DatasetError::MissingVariable(name) => Self::MissingCoordinateField(name),
            other => Self::Dataset(other),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Create a ConfigError.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<CommonError> for GridError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidGridParameters(msg) => Self::InvalidGridParameters(msg),
        }
    }
}

impl From<serde_yaml::Error> for GridError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
