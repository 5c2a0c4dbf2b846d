//! Synthetic WRF domains for tests.
//!
//! A [`SyntheticDomain`] writes the global attributes of a WRF run and the
//! `XLONG`/`XLAT` fields such a run would produce into a [`MemoryDataset`].
//! The lon/lat fields are computed with the same spherical Lambert projection
//! the grid tools use, so a correct reconstruction matches them to rounding.

use ndarray::{Array1, Array2, Array3, Axis};
use projection::LambertConformal;
use wrf_common::{LccParameters, WRF_EARTH_RADIUS};
use wrf_dataset::{names, MemoryDataset};

/// Description of a WRF domain to synthesize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticDomain {
    pub map_proj: i64,
    pub cen_lat: f64,
    pub cen_lon: f64,
    pub truelat1: f64,
    pub truelat2: f64,
    pub dx: f64,
    pub dy: f64,
    pub nx: usize,
    pub ny: usize,
    /// Length of the leading `Time` dimension
    pub time_steps: usize,
}

impl Default for SyntheticDomain {
    fn default() -> Self {
        Self::europe_12km()
    }
}

impl SyntheticDomain {
    /// Small central-European domain at 12 km.
    pub fn europe_12km() -> Self {
        Self {
            map_proj: 1,
            cen_lat: 52.0,
            cen_lon: 10.0,
            truelat1: 30.0,
            truelat2: 60.0,
            dx: 12_000.0,
            dy: 12_000.0,
            nx: 40,
            ny: 30,
            time_steps: 2,
        }
    }

    /// CONUS-like domain with a tangent cone and unequal spacing.
    pub fn conus_tangent() -> Self {
        Self {
            map_proj: 1,
            cen_lat: 38.5,
            cen_lon: -97.5,
            truelat1: 38.5,
            truelat2: 38.5,
            dx: 30_000.0,
            dy: 25_000.0,
            nx: 25,
            ny: 20,
            time_steps: 1,
        }
    }

    /// Tiny Southern Hemisphere domain with an odd/even size mix.
    pub fn southern_small() -> Self {
        Self {
            map_proj: 1,
            cen_lat: -35.0,
            cen_lon: 150.0,
            truelat1: -30.0,
            truelat2: -60.0,
            dx: 4_000.0,
            dy: 4_000.0,
            nx: 9,
            ny: 6,
            time_steps: 1,
        }
    }

    pub fn lcc_parameters(&self) -> LccParameters {
        LccParameters {
            truelat1: self.truelat1,
            truelat2: self.truelat2,
            center_lat: self.cen_lat,
            center_lon: self.cen_lon,
            sphere_radius: WRF_EARTH_RADIUS,
        }
    }

    /// Build the dataset: attributes plus native lon/lat on all three grids.
    pub fn build(&self) -> MemoryDataset {
        let lcc = LambertConformal::from_params(&self.lcc_parameters())
            .expect("synthetic domain has valid projection parameters");

        let x = centered(self.nx, self.dx);
        let y = centered(self.ny, self.dy);
        let x_stag = centered(self.nx + 1, self.dx);
        let y_stag = centered(self.ny + 1, self.dy);

        let mut dataset = MemoryDataset::new(format!(
            "synthetic LCC {}x{} at {}/{}",
            self.nx, self.ny, self.cen_lat, self.cen_lon
        ))
        .with_attribute(names::MAP_PROJ, self.map_proj)
        .with_attribute(names::CEN_LAT, self.cen_lat)
        .with_attribute(names::CEN_LON, self.cen_lon)
        .with_attribute(names::TRUELAT1, self.truelat1)
        .with_attribute(names::TRUELAT2, self.truelat2)
        .with_attribute(names::DX, self.dx)
        .with_attribute(names::DY, self.dy)
        .with_attribute(names::WE_PATCH_END_UNSTAG, self.nx as i64)
        .with_attribute(names::SN_PATCH_END_UNSTAG, self.ny as i64)
        .with_attribute("TITLE", "OUTPUT FROM SYNTHETIC WRF DOMAIN");

        for (lon_name, lat_name, xs, ys) in [
            (names::XLONG, names::XLAT, &x, &y),
            (names::XLONG_U, names::XLAT_U, &x_stag, &y),
            (names::XLONG_V, names::XLAT_V, &x, &y_stag),
        ] {
            let shape = (ys.len(), xs.len());
            let mut lon = Array2::<f64>::zeros(shape);
            let mut lat = Array2::<f64>::zeros(shape);
            for ((j, i), value) in lon.indexed_iter_mut() {
                let (lo, la) = lcc.inverse(xs[i], ys[j]);
                *value = lo;
                lat[[j, i]] = la;
            }
            dataset = dataset
                .with_variable(lon_name, repeat_in_time(&lon, self.time_steps).into_dyn())
                .with_variable(lat_name, repeat_in_time(&lat, self.time_steps).into_dyn());
        }

        dataset
    }
}

/// Cell-center distances from the domain center.
fn centered(n: usize, d: f64) -> Array1<f64> {
    let half = (n as f64 - 1.0) / 2.0;
    (0..n).map(|k| (k as f64 - half) * d).collect()
}

/// Stack `field` along a new leading `Time` axis.
fn repeat_in_time(field: &Array2<f64>, steps: usize) -> Array3<f64> {
    let (rows, cols) = field.dim();
    let mut stacked = Array3::<f64>::zeros((steps, rows, cols));
    for mut step in stacked.axis_iter_mut(Axis(0)) {
        step.assign(field);
    }
    stacked
}

/// Add `delta` to every element of a stored variable.
///
/// Panics if the variable is absent; fixtures always know their variables.
pub fn shift_variable(dataset: &mut MemoryDataset, name: &str, delta: f64) {
    let data = dataset
        .variable_mut(name)
        .unwrap_or_else(|| panic!("fixture has no variable {}", name));
    data.mapv_inplace(|v| v + delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrf_dataset::WrfDataset;

    #[test]
    fn test_build_shapes() {
        let domain = SyntheticDomain::southern_small();
        let ds = domain.build();

        assert_eq!(ds.variable(names::XLAT).unwrap().shape(), &[1, 6, 9]);
        assert_eq!(ds.variable(names::XLONG_U).unwrap().shape(), &[1, 6, 10]);
        assert_eq!(ds.variable(names::XLAT_V).unwrap().shape(), &[1, 7, 9]);
        assert_eq!(ds.attribute_i64(names::WE_PATCH_END_UNSTAG).unwrap(), 9);
    }

    #[test]
    fn test_odd_domain_center_is_projection_origin() {
        let ds = SyntheticDomain::southern_small().build();
        let lon = ds.coordinate_slice(names::XLONG, 0).unwrap();
        let lat = ds.coordinate_slice(names::XLAT_V, 0).unwrap();
        // Column 4 of 9 and v row 3 of 7 sit on the center
        for j in 0..6 {
            crate::assert_approx_eq!(lon[[j, 4]], 150.0, 1e-9);
        }
        crate::assert_approx_eq!(lat[[3, 4]], -35.0, 1e-9);
    }

    #[test]
    fn test_shift_variable() {
        let mut ds = SyntheticDomain::southern_small().build();
        let before = ds.coordinate_slice(names::XLAT, 0).unwrap();
        shift_variable(&mut ds, names::XLAT, 0.25);
        let after = ds.coordinate_slice(names::XLAT, 0).unwrap();
        crate::assert_approx_eq!(after[[2, 3]] - before[[2, 3]], 0.25, 1e-12);
    }
}
