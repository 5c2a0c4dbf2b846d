//! Coordinate reference system transformations.
//!
//! Implements the spherical Lambert Conformal Conic projection WRF uses,
//! geographic datums, and elementwise transforms between them, without
//! external geodesy dependencies.

pub mod error;
pub mod geographic;
pub mod lambert;
pub mod transform;

pub use error::{ProjectionError, ProjectionResult};
pub use geographic::{normalize_lon, shift_datum, Ellipsoid};
pub use lambert::LambertConformal;
pub use transform::{transform_grid, transform_point, Projection};
