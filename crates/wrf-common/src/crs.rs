//! Projection descriptors for WRF output and its reference coordinate systems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sphere radius WRF assumes for all its map projections (meters).
pub const WRF_EARTH_RADIUS: f64 = 6_370_000.0;

/// `MAP_PROJ` code WRF writes for Lambert Conformal Conic grids.
pub const MAP_PROJ_LAMBERT: i64 = 1;

/// WRF `MAP_PROJ` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapProjection {
    /// Lambert Conformal Conic (1)
    Lambert,
    /// Polar Stereographic (2)
    PolarStereographic,
    /// Mercator (3)
    Mercator,
    /// Cylindrical equidistant lat/lon, including rotated pole (6)
    LatLon,
    /// Any code WRF does not define
    Unknown(i64),
}

impl MapProjection {
    /// Interpret a `MAP_PROJ` attribute value.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MapProjection::Lambert,
            2 => MapProjection::PolarStereographic,
            3 => MapProjection::Mercator,
            6 => MapProjection::LatLon,
            other => MapProjection::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            MapProjection::Lambert => 1,
            MapProjection::PolarStereographic => 2,
            MapProjection::Mercator => 3,
            MapProjection::LatLon => 6,
            MapProjection::Unknown(code) => *code,
        }
    }

    /// Human readable projection name.
    pub fn name(&self) -> &'static str {
        match self {
            MapProjection::Lambert => "Lambert Conformal Conic",
            MapProjection::PolarStereographic => "Polar Stereographic",
            MapProjection::Mercator => "Mercator",
            MapProjection::LatLon => "Cylindrical Equidistant (lat/lon)",
            MapProjection::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for MapProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (MAP_PROJ={})", self.name(), self.code())
    }
}

/// Geodetic datum of a geographic coordinate system.
///
/// Only anchored datums take part in datum shifts: converting between
/// `Wgs84` and `AnchoredSphere` goes through geocentric coordinates, while a
/// plain `Sphere` passes its lon/lat through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Datum {
    /// WGS84 ellipsoid (EPSG:4326)
    Wgs84,
    /// Sphere with no relation to WGS84
    Sphere { radius: f64 },
    /// Sphere tied to WGS84 with a zero geocentric shift
    AnchoredSphere { radius: f64 },
}

impl Datum {
    /// Whether datum shifts apply to this datum.
    pub fn is_anchored(&self) -> bool {
        matches!(self, Datum::Wgs84 | Datum::AnchoredSphere { .. })
    }

    /// PROJ.4 style parameter fragment.
    pub fn proj_string(&self) -> String {
        match self {
            Datum::Wgs84 => "+datum=WGS84".to_string(),
            Datum::Sphere { radius } => format!("+a={} +b={}", radius, radius),
            Datum::AnchoredSphere { radius } => {
                format!("+a={} +b={} +towgs84=0,0,0", radius, radius)
            }
        }
    }
}

/// Lambert Conformal Conic parameters as stored in WRF global attributes.
///
/// Angles are in degrees. The projection origin is the domain center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LccParameters {
    /// First standard parallel (`TRUELAT1`)
    pub truelat1: f64,
    /// Second standard parallel (`TRUELAT2`)
    pub truelat2: f64,
    /// Latitude of origin (`CEN_LAT`)
    pub center_lat: f64,
    /// Central meridian (`CEN_LON`)
    pub center_lon: f64,
    /// Sphere radius in meters
    pub sphere_radius: f64,
}

/// Immutable description of a cartographic projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "proj", rename_all = "snake_case")]
pub enum ProjectionDescriptor {
    /// Lambert Conformal Conic on a sphere, coordinates in meters
    LambertConformal(LccParameters),
    /// Longitude/latitude in degrees on a datum
    Geographic(Datum),
}

impl ProjectionDescriptor {
    /// Plain WGS84 lon/lat (EPSG:4326).
    pub fn wgs84() -> Self {
        ProjectionDescriptor::Geographic(Datum::Wgs84)
    }

    /// Spherical lon/lat tied to WGS84, the datum WRF's lat/lon fields live on.
    pub fn anchored_sphere(radius: f64) -> Self {
        ProjectionDescriptor::Geographic(Datum::AnchoredSphere { radius })
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, ProjectionDescriptor::Geographic(_))
    }

    /// The LCC parameters, if this is a Lambert projection.
    pub fn lcc(&self) -> Option<&LccParameters> {
        match self {
            ProjectionDescriptor::LambertConformal(params) => Some(params),
            ProjectionDescriptor::Geographic(_) => None,
        }
    }

    /// Datum the coordinates of this projection are expressed on.
    pub fn datum(&self) -> Datum {
        match self {
            ProjectionDescriptor::LambertConformal(params) => Datum::Sphere {
                radius: params.sphere_radius,
            },
            ProjectionDescriptor::Geographic(datum) => *datum,
        }
    }
}

impl fmt::Display for ProjectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionDescriptor::LambertConformal(p) => write!(
                f,
                "+proj=lcc +lat_1={:.6} +lat_2={:.6} +lat_0={:.6} +lon_0={:.6} +a={}",
                p.truelat1, p.truelat2, p.center_lat, p.center_lon, p.sphere_radius
            ),
            ProjectionDescriptor::Geographic(datum) => {
                write!(f, "+proj=latlong {}", datum.proj_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_projection_codes() {
        assert_eq!(MapProjection::from_code(1), MapProjection::Lambert);
        assert_eq!(MapProjection::from_code(6), MapProjection::LatLon);
        assert_eq!(MapProjection::from_code(42), MapProjection::Unknown(42));
        assert_eq!(MapProjection::from_code(3).code(), 3);
        assert_eq!(MapProjection::from_code(42).code(), 42);
    }

    #[test]
    fn test_datum_anchoring() {
        assert!(Datum::Wgs84.is_anchored());
        assert!(Datum::AnchoredSphere { radius: WRF_EARTH_RADIUS }.is_anchored());
        assert!(!Datum::Sphere { radius: WRF_EARTH_RADIUS }.is_anchored());
    }

    #[test]
    fn test_lcc_descriptor_datum_is_unanchored_sphere() {
        let desc = ProjectionDescriptor::LambertConformal(LccParameters {
            truelat1: 30.0,
            truelat2: 60.0,
            center_lat: 52.0,
            center_lon: 10.0,
            sphere_radius: WRF_EARTH_RADIUS,
        });
        assert_eq!(
            desc.datum(),
            Datum::Sphere {
                radius: WRF_EARTH_RADIUS
            }
        );
        assert!(!desc.is_geographic());
        assert!(desc.to_string().starts_with("+proj=lcc +lat_1=30.000000"));
    }
}
