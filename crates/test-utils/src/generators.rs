//! Array generators for hand-built coordinate fields.

use ndarray::Array2;

/// Regular lon/lat grid, shape `(lats.len(), lons.len())`.
pub fn create_latlon_grid(lons: &[f64], lats: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let shape = (lats.len(), lons.len());
    (
        Array2::from_shape_fn(shape, |(_, i)| lons[i]),
        Array2::from_shape_fn(shape, |(j, _)| lats[j]),
    )
}
