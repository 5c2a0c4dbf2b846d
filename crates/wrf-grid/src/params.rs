//! Grid spacing and extent from WRF global attributes.

use wrf_common::GridParameters;
use wrf_dataset::{names, WrfDataset};

use crate::error::{GridError, Result};

/// Read `DX`, `DY` and the unstaggered patch ends.
///
/// The patch ends of a single-patch wrfout file are the mass-point counts.
pub fn extract_grid_parameters<D: WrfDataset + ?Sized>(dataset: &D) -> Result<GridParameters> {
    let dx = dataset
        .attribute_f64(names::DX)
        .map_err(GridError::from_metadata)?;
    let dy = dataset
        .attribute_f64(names::DY)
        .map_err(GridError::from_metadata)?;
    let nx = point_count(dataset, names::WE_PATCH_END_UNSTAG)?;
    let ny = point_count(dataset, names::SN_PATCH_END_UNSTAG)?;

    Ok(GridParameters::new(dx, dy, nx, ny)?)
}

fn point_count<D: WrfDataset + ?Sized>(dataset: &D, name: &str) -> Result<usize> {
    let count = dataset
        .attribute_i64(name)
        .map_err(GridError::from_metadata)?;

    usize::try_from(count)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| {
            GridError::InvalidGridParameters(format!("{} must be at least 1, got {}", name, count))
        })
}
