//! Analytic reconstruction of the WRF grid in projected coordinates.
//!
//! WRF places the projection origin at the domain center, so every axis is a
//! run of evenly spaced distances centered on zero. Mass points sit at cell
//! centers; the staggered axes have one extra point and sit on cell edges.
//!
//! ```text
//!   x_stag:  |     |     |     |        nx + 1 edges
//!   x:          *     *     *           nx centers
//! ```

use ndarray::{Array1, Array2};
use tracing::debug;
use wrf_common::{GridParameters, GridVariant};

/// Centered coordinate axis of `n` points spaced `d` apart.
///
/// Element `k` is `(k - (n - 1) / 2) * d`: odd `n` hits zero exactly, even
/// `n` straddles it by half a cell.
pub fn make_axis(n: usize, d: f64) -> Array1<f64> {
    let center = (n as f64 - 1.0) / 2.0;
    Array1::from_iter((0..n).map(|k| (k as f64 - center) * d))
}

/// The four 1D axes of a WRF domain, in meters from the domain center.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxes {
    /// Mass-point west-east axis (`nx` points)
    pub x: Array1<f64>,
    /// Mass-point south-north axis (`ny` points)
    pub y: Array1<f64>,
    /// Staggered west-east axis (`nx + 1` points)
    pub x_stag: Array1<f64>,
    /// Staggered south-north axis (`ny + 1` points)
    pub y_stag: Array1<f64>,
}

impl CoordinateAxes {
    pub fn new(params: &GridParameters) -> Self {
        Self {
            x: make_axis(params.nx, params.dx),
            y: make_axis(params.ny, params.dy),
            x_stag: make_axis(params.nx + 1, params.dx),
            y_stag: make_axis(params.ny + 1, params.dy),
        }
    }
}

/// 2D projected coordinates of one grid variant, shape `(len(y), len(x))`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl MeshGrid {
    /// Outer product of two axes: `x[[j, i]] = x_axis[i]`, `y[[j, i]] = y_axis[j]`.
    pub fn from_axes(x_axis: &Array1<f64>, y_axis: &Array1<f64>) -> Self {
        let shape = (y_axis.len(), x_axis.len());
        Self {
            x: Array2::from_shape_fn(shape, |(_, i)| x_axis[i]),
            y: Array2::from_shape_fn(shape, |(j, _)| y_axis[j]),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Mesh grids for the three Arakawa C-grid variants.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrids {
    pub mass: MeshGrid,
    pub u: MeshGrid,
    pub v: MeshGrid,
}

impl MeshGrids {
    pub fn get(&self, variant: GridVariant) -> &MeshGrid {
        match variant {
            GridVariant::Mass => &self.mass,
            GridVariant::U => &self.u,
            GridVariant::V => &self.v,
        }
    }
}

/// Output of [`reconstruct_grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedGrid {
    pub axes: CoordinateAxes,
    pub grids: MeshGrids,
}

/// Rebuild the regular grid a set of grid parameters describes.
pub fn reconstruct_grid(params: &GridParameters) -> ReconstructedGrid {
    let axes = CoordinateAxes::new(params);

    let grids = MeshGrids {
        mass: MeshGrid::from_axes(&axes.x, &axes.y),
        u: MeshGrid::from_axes(&axes.x_stag, &axes.y),
        v: MeshGrid::from_axes(&axes.x, &axes.y_stag),
    };

    debug!(
        nx = params.nx,
        ny = params.ny,
        dx = params.dx,
        dy = params.dy,
        "Reconstructed grid"
    );

    ReconstructedGrid { axes, grids }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_even_axis() {
        assert_eq!(make_axis(4, 1000.0), array![-1500.0, -500.0, 500.0, 1500.0]);
    }

    #[test]
    fn test_odd_axis() {
        assert_eq!(
            make_axis(5, 1000.0),
            array![-2000.0, -1000.0, 0.0, 1000.0, 2000.0]
        );
        assert_eq!(make_axis(1, 1000.0), array![0.0]);
    }

    #[test]
    fn test_small_domain() {
        let params = GridParameters::new(1000.0, 2000.0, 4, 3).unwrap();
        let grid = reconstruct_grid(&params);

        assert_eq!(grid.axes.x, array![-1500.0, -500.0, 500.0, 1500.0]);
        assert_eq!(grid.axes.y, array![-2000.0, 0.0, 2000.0]);
        assert_eq!(grid.axes.x_stag, array![-2000.0, -1000.0, 0.0, 1000.0, 2000.0]);
        assert_eq!(grid.axes.y_stag, array![-3000.0, -1000.0, 1000.0, 3000.0]);

        assert_eq!(grid.grids.mass.dim(), (3, 4));
        assert_eq!(grid.grids.mass.x[[2, 0]], -1500.0);
        assert_eq!(grid.grids.mass.y[[2, 0]], 2000.0);
    }

    #[test]
    fn test_y_stag_uses_own_direction() {
        // Distinct counts and spacings per direction
        let params = GridParameters::new(3000.0, 12000.0, 10, 4).unwrap();
        let axes = CoordinateAxes::new(&params);
        assert_eq!(axes.y_stag.len(), 5);
        assert_eq!(axes.y_stag[1] - axes.y_stag[0], 12000.0);
    }

    #[test]
    fn test_variant_shapes_match_params() {
        let params = GridParameters::new(12000.0, 12000.0, 7, 5).unwrap();
        let grid = reconstruct_grid(&params);
        for variant in GridVariant::ALL {
            let mesh = grid.grids.get(variant);
            assert_eq!(mesh.dim(), params.shape(variant), "{}", variant);
            assert_eq!(mesh.y.dim(), params.shape(variant), "{}", variant);
        }
    }

    proptest! {
        #[test]
        fn axis_is_centered_and_increasing(n in 1usize..400, d in 1.0f64..50_000.0) {
            let axis = make_axis(n, d);
            prop_assert_eq!(axis.len(), n);
            for k in 1..n {
                prop_assert!(axis[k] > axis[k - 1]);
            }
            for k in 0..n {
                prop_assert!((axis[k] + axis[n - 1 - k]).abs() <= 1e-9 * d * n as f64);
            }
            if n % 2 == 1 {
                prop_assert_eq!(axis[n / 2], 0.0);
            }
        }

        #[test]
        fn staggered_axis_has_one_more_point(n in 1usize..400, d in 1.0f64..50_000.0) {
            let mass = make_axis(n, d);
            let stag = make_axis(n + 1, d);
            prop_assert_eq!(stag.len(), n + 1);
            prop_assert!((stag[1] - stag[0] - d).abs() < 1e-9 * d);
            // Edges bracket centers by half a cell
            prop_assert!((mass[0] - stag[0] - d / 2.0).abs() < 1e-6 * d);
        }
    }
}
