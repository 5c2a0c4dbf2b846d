//! Grid geometry for WRF output.

use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing and size of a WRF mass-point grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    /// Grid spacing in the west-east direction (meters)
    pub dx: f64,
    /// Grid spacing in the south-north direction (meters)
    pub dy: f64,
    /// Number of unstaggered points west-east
    pub nx: usize,
    /// Number of unstaggered points south-north
    pub ny: usize,
}

impl GridParameters {
    /// Create grid parameters, rejecting empty grids.
    pub fn new(dx: f64, dy: f64, nx: usize, ny: usize) -> CommonResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(CommonError::InvalidGridParameters(format!(
                "grid must have at least one point in each direction, got nx={} ny={}",
                nx, ny
            )));
        }
        Ok(Self { dx, dy, nx, ny })
    }

    /// Shape (rows, cols) of arrays on the given grid variant.
    pub fn shape(&self, variant: GridVariant) -> (usize, usize) {
        match variant {
            GridVariant::Mass => (self.ny, self.nx),
            GridVariant::U => (self.ny, self.nx + 1),
            GridVariant::V => (self.ny + 1, self.nx),
        }
    }
}

/// Arakawa C-grid point locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridVariant {
    /// Cell centers
    Mass,
    /// West-east staggered (u wind) points
    U,
    /// South-north staggered (v wind) points
    V,
}

impl GridVariant {
    /// All variants in reporting order.
    pub const ALL: [GridVariant; 3] = [GridVariant::Mass, GridVariant::U, GridVariant::V];

    pub fn as_str(&self) -> &'static str {
        match self {
            GridVariant::Mass => "mass_grid",
            GridVariant::U => "u_grid",
            GridVariant::V => "v_grid",
        }
    }
}

impl fmt::Display for GridVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
