//! Geographic coordinates, reference ellipsoids and datum shifts.
//!
//! WRF computes its lat/lon fields on a sphere, while most reference data is
//! on WGS84. A datum shift goes through earth-centered, earth-fixed (ECEF)
//! coordinates with a zero translation, the same as PROJ's `+towgs84=0,0,0`.

use wrf_common::Datum;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub semi_major_axis: f64,
    /// Flattening (0 for a sphere)
    pub flattening: f64,
}

impl Ellipsoid {
    /// WGS84 ellipsoid.
    pub fn wgs84() -> Self {
        Self {
            semi_major_axis: 6378137.0,
            flattening: 1.0 / 298.257223563,
        }
    }

    /// Sphere of the given radius.
    pub fn sphere(radius: f64) -> Self {
        Self {
            semi_major_axis: radius,
            flattening: 0.0,
        }
    }

    /// Ellipsoid a datum is defined on.
    pub fn for_datum(datum: &Datum) -> Self {
        match datum {
            Datum::Wgs84 => Self::wgs84(),
            Datum::Sphere { radius } | Datum::AnchoredSphere { radius } => Self::sphere(*radius),
        }
    }

    /// Semi-minor axis (meters).
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening)
    }

    /// First eccentricity squared.
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// Geodetic (degrees, meters above the ellipsoid) to ECEF meters.
    pub fn to_ecef(&self, lon_deg: f64, lat_deg: f64, height: f64) -> (f64, f64, f64) {
        let lon = lon_deg.to_radians();
        let lat = lat_deg.to_radians();
        let e2 = self.eccentricity_squared();

        // Prime vertical radius of curvature
        let n = self.semi_major_axis / (1.0 - e2 * lat.sin().powi(2)).sqrt();

        let x = (n + height) * lat.cos() * lon.cos();
        let y = (n + height) * lat.cos() * lon.sin();
        let z = (n * (1.0 - e2) + height) * lat.sin();
        (x, y, z)
    }

    /// ECEF meters to geodetic `(lon, lat, height)` in degrees and meters.
    ///
    /// Iterates the latitude until it stops changing; a handful of steps is
    /// enough for points near the surface.
    pub fn from_ecef(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let a = self.semi_major_axis;
        let e2 = self.eccentricity_squared();
        let p = x.hypot(y);
        let lon = y.atan2(x);

        if p < 1e-9 {
            // On the polar axis
            let lat = std::f64::consts::FRAC_PI_2.copysign(z);
            let height = z.abs() - self.semi_minor_axis();
            return (lon.to_degrees(), lat.to_degrees(), height);
        }

        let mut lat = z.atan2(p * (1.0 - e2));
        let mut height = 0.0;
        for _ in 0..16 {
            let n = a / (1.0 - e2 * lat.sin().powi(2)).sqrt();
            height = p / lat.cos() - n;
            let next = z.atan2(p * (1.0 - e2 * n / (n + height)));
            let converged = (next - lat).abs() < 1e-15;
            lat = next;
            if converged {
                break;
            }
        }

        (lon.to_degrees(), lat.to_degrees(), height)
    }
}

/// Wrap a longitude in degrees into `[-180, 180)`.
pub fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Move a lon/lat pair (degrees) from one datum to another.
///
/// The shift only happens when both datums are anchored to WGS84; otherwise
/// the coordinates are returned unchanged apart from longitude wrapping.
pub fn shift_datum(lon: f64, lat: f64, from: &Datum, to: &Datum) -> (f64, f64) {
    if from == to || !from.is_anchored() || !to.is_anchored() {
        return (normalize_lon(lon), lat);
    }

    let (x, y, z) = Ellipsoid::for_datum(from).to_ecef(lon, lat, 0.0);
    let (lon, lat, _) = Ellipsoid::for_datum(to).from_ecef(x, y, z);
    (normalize_lon(lon), lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRF_RADIUS: f64 = 6_370_000.0;

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(190.0), -170.0);
        assert_eq!(normalize_lon(-190.0), 170.0);
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
    }

    #[test]
    fn test_ecef_roundtrip_wgs84() {
        let ell = Ellipsoid::wgs84();
        let (x, y, z) = ell.to_ecef(10.0, 52.0, 120.0);
        let (lon, lat, h) = ell.from_ecef(x, y, z);
        assert!((lon - 10.0).abs() < 1e-10);
        assert!((lat - 52.0).abs() < 1e-10);
        assert!((h - 120.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_ecef_is_geocentric() {
        let ell = Ellipsoid::sphere(WRF_RADIUS);
        let (x, y, z) = ell.to_ecef(0.0, 45.0, 0.0);
        assert!((x - z).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
        assert!((x.hypot(z) - WRF_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_unanchored_sphere_passes_through() {
        let sphere = Datum::Sphere { radius: WRF_RADIUS };
        let (lon, lat) = shift_datum(10.0, 52.0, &sphere, &Datum::Wgs84);
        assert_eq!((lon, lat), (10.0, 52.0));
    }

    #[test]
    fn test_anchored_sphere_shifts_latitude() {
        let sphere = Datum::AnchoredSphere { radius: WRF_RADIUS };
        let (lon, lat) = shift_datum(10.0, 45.0, &sphere, &Datum::Wgs84);
        assert!((lon - 10.0).abs() < 1e-12, "longitude is unchanged by a zero shift");
        // Geocentric 45° is ~45.19° geodetic on WGS84
        assert!(lat > 45.15 && lat < 45.25, "got {}", lat);

        let (_, equator) = shift_datum(10.0, 0.0, &sphere, &Datum::Wgs84);
        assert!(equator.abs() < 1e-9);
    }

    #[test]
    fn test_datum_shift_roundtrip() {
        let sphere = Datum::AnchoredSphere { radius: WRF_RADIUS };
        let (lon, lat) = shift_datum(-97.5, 38.5, &sphere, &Datum::Wgs84);
        let (lon2, lat2) = shift_datum(lon, lat, &Datum::Wgs84, &sphere);
        // Ellipsoidal height is dropped on the way, so the return trip is close but not exact
        assert!((lon2 + 97.5).abs() < 1e-10);
        assert!((lat2 - 38.5).abs() < 1e-4, "got {}", lat2);
    }
}
