//! Lambert Conformal Conic projection on a sphere.
//!
//! This is the projection WRF uses for `MAP_PROJ = 1`. It maps a cone
//! secant (or tangent) to the sphere onto a flat plane.
//!
//! The projection parameters include:
//! - Standard parallels: latin1 and latin2 (equal for a tangent cone)
//! - Origin: lat0/lon0, the WRF domain center (`CEN_LAT`, `CEN_LON`)
//! - Sphere radius: WRF assumes 6370 km
//!
//! Projected coordinates are meters east/north of the origin, the same
//! frame the reconstructed WRF grid axes live in.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use wrf_common::LccParameters;

use crate::error::{ProjectionError, ProjectionResult};
use crate::geographic::normalize_lon;

/// Parallels closer than this to a pole cannot carry a cone.
const POLE_EPSILON: f64 = 1e-10;

/// Lambert Conformal Conic projection parameters.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of origin in radians
    pub lat0: f64,
    /// First standard parallel in radians
    pub latin1: f64,
    /// Second standard parallel in radians
    pub latin2: f64,
    /// Sphere radius (meters)
    pub earth_radius: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the origin latitude
    rho0: f64,
}

impl LambertConformal {
    /// Create a spherical Lambert Conformal projection.
    ///
    /// # Arguments
    /// * `latin1_deg` - First standard parallel (degrees)
    /// * `latin2_deg` - Second standard parallel (degrees)
    /// * `lat0_deg` - Latitude of origin (degrees)
    /// * `lon0_deg` - Central meridian (degrees)
    /// * `earth_radius` - Sphere radius (meters)
    pub fn new(
        latin1_deg: f64,
        latin2_deg: f64,
        lat0_deg: f64,
        lon0_deg: f64,
        earth_radius: f64,
    ) -> ProjectionResult<Self> {
        if !earth_radius.is_finite() || earth_radius <= 0.0 {
            return Err(ProjectionError::InvalidParameters(format!(
                "sphere radius must be positive, got {}",
                earth_radius
            )));
        }
        for (name, value) in [
            ("latin1", latin1_deg),
            ("latin2", latin2_deg),
            ("lat0", lat0_deg),
            ("lon0", lon0_deg),
        ] {
            if !value.is_finite() {
                return Err(ProjectionError::InvalidParameters(format!(
                    "{} is not finite",
                    name
                )));
            }
        }

        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();
        let latin1 = latin1_deg.to_radians();
        let latin2 = latin2_deg.to_radians();

        for (name, value) in [("latin1", latin1), ("latin2", latin2), ("lat0", lat0)] {
            if FRAC_PI_2 - value.abs() < POLE_EPSILON {
                return Err(ProjectionError::InvalidParameters(format!(
                    "{} must lie strictly between the poles",
                    name
                )));
            }
        }

        // Cone constant n
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone (single standard parallel)
            latin1.sin()
        } else {
            // Secant cone (two standard parallels)
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio = ((FRAC_PI_4 + latin2 / 2.0).tan() / (FRAC_PI_4 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        if !n.is_finite() || n.abs() < 1e-10 {
            return Err(ProjectionError::InvalidParameters(format!(
                "standard parallels {} and {} give a degenerate cone",
                latin1_deg, latin2_deg
            )));
        }

        let f = (latin1.cos() * (FRAC_PI_4 + latin1 / 2.0).tan().powf(n)) / n;
        let rho0 = earth_radius * f / (FRAC_PI_4 + lat0 / 2.0).tan().powf(n);

        Ok(Self {
            lon0,
            lat0,
            latin1,
            latin2,
            earth_radius,
            n,
            f,
            rho0,
        })
    }

    /// Create the projection described by WRF LCC parameters.
    pub fn from_params(params: &LccParameters) -> ProjectionResult<Self> {
        Self::new(
            params.truelat1,
            params.truelat2,
            params.center_lat,
            params.center_lon,
            params.sphere_radius,
        )
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Distance from the cone apex for a latitude in radians.
    fn rho(&self, lat: f64) -> f64 {
        self.earth_radius * self.f / (FRAC_PI_4 + lat / 2.0).tan().powf(self.n)
    }

    /// Convert geographic coordinates (degrees) to projected meters.
    ///
    /// Returns `(x, y)` relative to the projection origin. The antipodal pole
    /// of the cone maps to infinity.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();

        // Longitude difference in [-π, π); non-finite input stays NaN
        let dlon = (lon_deg.to_radians() - self.lon0 + PI).rem_euclid(2.0 * PI) - PI;

        let rho = self.rho(lat);
        let theta = self.n * dlon;

        let x = rho * theta.sin();
        let y = self.rho0 - rho * theta.cos();
        (x, y)
    }

    /// Convert projected meters back to geographic coordinates.
    ///
    /// Returns `(lon, lat)` in degrees with longitude in `[-180, 180)`.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let dy = self.rho0 - y;

        let (rho, theta) = if self.n < 0.0 {
            (-x.hypot(dy), (-x).atan2(-dy))
        } else {
            (x.hypot(dy), x.atan2(dy))
        };

        let lat = if rho == 0.0 {
            FRAC_PI_2.copysign(self.n)
        } else {
            2.0 * ((self.earth_radius * self.f / rho).powf(1.0 / self.n)).atan() - FRAC_PI_2
        };
        let lon = self.lon0 + theta / self.n;

        (normalize_lon(lon.to_degrees()), lat.to_degrees())
    }
}
