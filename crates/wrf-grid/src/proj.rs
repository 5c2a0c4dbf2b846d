//! Projection descriptors built from WRF metadata.

use tracing::debug;
use wrf_common::{LccParameters, MapProjection, ProjectionDescriptor};
use wrf_dataset::{names, WrfDataset};

use crate::config::{GridCheckConfig, ReferenceDatum};
use crate::error::{GridError, Result};

/// Build the Lambert Conformal projection a WRF dataset was run on.
///
/// WRF's lat/lon fields are computed on a sphere, so the projection always
/// uses the configured sphere radius rather than an ellipsoid.
pub fn build_projection<D: WrfDataset + ?Sized>(
    dataset: &D,
    config: &GridCheckConfig,
) -> Result<ProjectionDescriptor> {
    let code = dataset
        .attribute_i64(names::MAP_PROJ)
        .map_err(GridError::from_metadata)?;

    if code != config.lambert_map_proj {
        return Err(GridError::UnsupportedProjectionKind {
            projection: MapProjection::from_code(code),
            expected: config.lambert_map_proj,
        });
    }

    let read = |name| dataset.attribute_f64(name).map_err(GridError::from_metadata);

    let params = LccParameters {
        truelat1: read(names::TRUELAT1)?,
        truelat2: read(names::TRUELAT2)?,
        center_lat: read(names::CEN_LAT)?,
        center_lon: read(names::CEN_LON)?,
        sphere_radius: config.sphere_radius,
    };

    let descriptor = ProjectionDescriptor::LambertConformal(params);
    debug!(projection = %descriptor, "Built WRF projection");

    Ok(descriptor)
}

/// The lon/lat systems a WRF grid can be checked against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceProjections {
    /// WGS84 lon/lat
    pub wgs84: ProjectionDescriptor,
    /// Lon/lat on WRF's sphere, tied to WGS84 with a zero shift
    pub sphere: ProjectionDescriptor,
}

impl ReferenceProjections {
    pub fn select(&self, datum: ReferenceDatum) -> &ProjectionDescriptor {
        match datum {
            ReferenceDatum::Wgs84 => &self.wgs84,
            ReferenceDatum::Sphere => &self.sphere,
        }
    }
}

pub fn reference_projections(config: &GridCheckConfig) -> ReferenceProjections {
    ReferenceProjections {
        wgs84: ReferenceDatum::Wgs84.descriptor(config.sphere_radius),
        sphere: ReferenceDatum::Sphere.descriptor(config.sphere_radius),
    }
}
