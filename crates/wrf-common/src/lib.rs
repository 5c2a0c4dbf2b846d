//! Common types shared across the WRF grid tooling.

pub mod crs;
pub mod error;
pub mod grid;

pub use crs::{
    Datum, LccParameters, MapProjection, ProjectionDescriptor, MAP_PROJ_LAMBERT,
    WRF_EARTH_RADIUS,
};
pub use error::{CommonError, CommonResult};
pub use grid::{GridParameters, GridVariant};
