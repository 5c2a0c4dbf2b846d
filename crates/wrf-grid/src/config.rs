//! Configuration for grid reconstruction and checking.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wrf_common::{ProjectionDescriptor, MAP_PROJ_LAMBERT, WRF_EARTH_RADIUS};

use crate::error::{GridError, Result};

/// Configuration for reproducing a WRF grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridCheckConfig {
    /// Sphere radius WRF's projection assumes (meters).
    pub sphere_radius: f64,

    /// `MAP_PROJ` code accepted as Lambert Conformal Conic.
    pub lambert_map_proj: i64,

    /// Time step the native lat/lon fields are read from.
    pub time_index: usize,

    /// Geographic reference the reconstructed grid is checked against.
    pub reference_datum: ReferenceDatum,
}

impl Default for GridCheckConfig {
    fn default() -> Self {
        Self {
            sphere_radius: WRF_EARTH_RADIUS,
            lambert_map_proj: MAP_PROJ_LAMBERT,
            time_index: 0,
            reference_datum: ReferenceDatum::Wgs84,
        }
    }
}

impl GridCheckConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GridError::config_error(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Apply environment variable overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("WRF_SPHERE_RADIUS") {
            if let Ok(radius) = val.parse() {
                self.sphere_radius = radius;
            }
        }

        if let Ok(val) = std::env::var("WRF_LAMBERT_MAP_PROJ") {
            if let Ok(code) = val.parse() {
                self.lambert_map_proj = code;
            }
        }

        if let Ok(val) = std::env::var("WRF_TIME_INDEX") {
            if let Ok(index) = val.parse() {
                self.time_index = index;
            }
        }

        if let Ok(val) = std::env::var("WRF_REFERENCE_DATUM") {
            if let Ok(reference) = val.parse() {
                self.reference_datum = reference;
            }
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.sphere_radius.is_finite() || self.sphere_radius <= 0.0 {
            return Err(format!(
                "sphere_radius must be a positive number of meters, got {}",
                self.sphere_radius
            ));
        }

        Ok(())
    }
}

/// Geographic reference system for the consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDatum {
    /// WGS84 lon/lat (EPSG:4326).
    #[default]
    Wgs84,
    /// Lon/lat on WRF's sphere, anchored to WGS84.
    Sphere,
}

impl std::str::FromStr for ReferenceDatum {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wgs84" | "epsg:4326" => Ok(Self::Wgs84),
            "sphere" | "spherical" => Ok(Self::Sphere),
            other => Err(format!("unknown reference datum: {}", other)),
        }
    }
}

impl ReferenceDatum {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wgs84 => "wgs84",
            Self::Sphere => "sphere",
        }
    }

    /// Projection descriptor for this reference.
    pub fn descriptor(&self, sphere_radius: f64) -> ProjectionDescriptor {
        match self {
            Self::Wgs84 => ProjectionDescriptor::wgs84(),
            Self::Sphere => ProjectionDescriptor::anchored_sphere(sphere_radius),
        }
    }
}

impl std::fmt::Display for ReferenceDatum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
