//! Cross-check of the reconstructed grid against the native lon/lat fields.
//!
//! Each grid variant is compared in both directions:
//!
//! - **forward**: reconstructed `(X, Y)` projected from the model projection
//!   to the reference projection, compared with the native `(lon, lat)`;
//! - **inverse**: native `(lon, lat)` projected back to the model projection,
//!   compared with the reconstructed `(X, Y)`.
//!
//! Differences are `transformed - target`. Disagreement is never an error;
//! the statistics are returned for the caller to judge.

use std::fmt;

use ndarray::{Array2, Zip};
use projection::{normalize_lon, transform_grid, Projection};
use serde::Serialize;
use wrf_common::{GridVariant, ProjectionDescriptor};

use crate::error::{GridError, Result};
use crate::native::GeoGrids;
use crate::reconstruct::MeshGrids;
use crate::stats::nanmean;

/// Which way a comparison transforms coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformDirection {
    /// Model projection to reference projection
    Forward,
    /// Reference projection to model projection
    Inverse,
}

impl fmt::Display for TransformDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformDirection::Forward => write!(f, "forward"),
            TransformDirection::Inverse => write!(f, "inverse"),
        }
    }
}

/// Statistics of the signed differences for one coordinate component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentStats {
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    /// `(row, col)` of the first occurrence of `max`
    pub argmax: Option<(usize, usize)>,
    /// Largest magnitude of any difference, either sign
    pub max_abs: f64,
    /// Non-finite differences left out of the statistics
    pub skipped: usize,
}

impl ComponentStats {
    /// Statistics of `transformed - target`.
    ///
    /// With `wrap_longitude`, differences are folded into `[-180, 180)` so a
    /// grid straddling the antimeridian does not report 360° errors.
    pub fn from_difference(
        transformed: &Array2<f64>,
        target: &Array2<f64>,
        wrap_longitude: bool,
    ) -> Self {
        let mut diff = Array2::<f64>::zeros(target.dim());
        Zip::from(&mut diff)
            .and(transformed)
            .and(target)
            .for_each(|d, &t, &r| {
                let delta = t - r;
                *d = if !delta.is_finite() {
                    f64::NAN
                } else if wrap_longitude {
                    normalize_lon(delta)
                } else {
                    delta
                };
            });

        let mut sum = 0.0;
        let mut max = f64::NAN;
        let mut argmax = None;
        let mut max_abs = f64::NAN;
        let mut skipped = 0;

        for ((row, col), &d) in diff.indexed_iter() {
            if d.is_nan() {
                skipped += 1;
                continue;
            }
            sum += d;
            if argmax.is_none() || d > max {
                max = d;
                argmax = Some((row, col));
            }
            max_abs = max_abs.max(d.abs());
        }

        Self {
            sum,
            mean: nanmean(&diff),
            max,
            argmax,
            max_abs,
            skipped,
        }
    }
}

/// Both component statistics for one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionStats {
    pub direction: TransformDirection,
    /// Whether the compared coordinates are lon/lat degrees rather than meters
    pub target_is_geographic: bool,
    /// Longitude (or projected x) component
    pub x: ComponentStats,
    /// Latitude (or projected y) component
    pub y: ComponentStats,
}

/// Forward and inverse comparisons for one grid variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantReport {
    pub variant: GridVariant,
    pub forward: DirectionStats,
    pub inverse: DirectionStats,
}

/// Result of comparing the reconstructed grids with the native ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscrepancyReport {
    /// Projection of the reconstructed grid
    pub source_projection: ProjectionDescriptor,
    /// Projection of the native grid
    pub target_projection: ProjectionDescriptor,
    /// One entry per variant, in mass, u, v order
    pub variants: Vec<VariantReport>,
}

impl DiscrepancyReport {
    pub fn variant(&self, variant: GridVariant) -> Option<&VariantReport> {
        self.variants.iter().find(|report| report.variant == variant)
    }

    /// Largest inverse-direction error magnitude over all variants, 0 if none.
    pub fn worst_inverse_error(&self) -> f64 {
        self.variants
            .iter()
            .flat_map(|entry| [entry.inverse.x.max_abs, entry.inverse.y.max_abs])
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Compare reconstructed grids in `proj_a` with native grids in `proj_b`.
///
/// Fails only when a reconstructed and a native grid disagree in shape or a
/// projection cannot be built.
pub fn check_consistency(
    reconstructed: &MeshGrids,
    native: &GeoGrids,
    proj_a: &ProjectionDescriptor,
    proj_b: &ProjectionDescriptor,
) -> Result<DiscrepancyReport> {
    let from = Projection::from_descriptor(proj_a)?;
    let to = Projection::from_descriptor(proj_b)?;

    let mut variants = Vec::with_capacity(GridVariant::ALL.len());

    for variant in GridVariant::ALL {
        let mesh = reconstructed.get(variant);
        let geo = native.get(variant);

        if mesh.dim() != geo.dim() {
            return Err(GridError::shape_mismatch(
                format!("{} reconstructed vs native", variant),
                mesh.dim(),
                geo.dim(),
            ));
        }

        let (lon, lat) = transform_grid(&from, &to, &mesh.x, &mesh.y)?;
        let forward = DirectionStats {
            direction: TransformDirection::Forward,
            target_is_geographic: proj_b.is_geographic(),
            x: ComponentStats::from_difference(&lon, &geo.lon, proj_b.is_geographic()),
            y: ComponentStats::from_difference(&lat, &geo.lat, false),
        };

        let (x, y) = transform_grid(&to, &from, &geo.lon, &geo.lat)?;
        let inverse = DirectionStats {
            direction: TransformDirection::Inverse,
            target_is_geographic: proj_a.is_geographic(),
            x: ComponentStats::from_difference(&x, &mesh.x, proj_a.is_geographic()),
            y: ComponentStats::from_difference(&y, &mesh.y, false),
        };

        variants.push(VariantReport {
            variant,
            forward,
            inverse,
        });
    }

    Ok(DiscrepancyReport {
        source_projection: *proj_a,
        target_projection: *proj_b,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::GeoGrid;
    use crate::reconstruct::reconstruct_grid;
    use ndarray::array;
    use wrf_common::{GridParameters, LccParameters};

    fn lcc() -> ProjectionDescriptor {
        ProjectionDescriptor::LambertConformal(LccParameters {
            truelat1: 30.0,
            truelat2: 60.0,
            center_lat: 52.0,
            center_lon: 10.0,
            sphere_radius: 6_370_000.0,
        })
    }

    /// Native grids produced by inverting the reconstructed grids exactly.
    fn exact_native(grids: &MeshGrids, proj_a: &ProjectionDescriptor) -> GeoGrids {
        let from = Projection::from_descriptor(proj_a).unwrap();
        let to = Projection::from_descriptor(&ProjectionDescriptor::wgs84()).unwrap();
        let geo = |variant| {
            let mesh = grids.get(variant);
            let (lon, lat) = transform_grid(&from, &to, &mesh.x, &mesh.y).unwrap();
            GeoGrid { lon, lat }
        };
        GeoGrids {
            mass: geo(GridVariant::Mass),
            u: geo(GridVariant::U),
            v: geo(GridVariant::V),
        }
    }

    #[test]
    fn test_component_stats() {
        let transformed = array![[1.0, 5.0], [2.0, 5.0]];
        let target = array![[0.0, 1.0], [4.0, 1.0]];
        let stats = ComponentStats::from_difference(&transformed, &target, false);

        assert_eq!(stats.sum, 7.0);
        assert_eq!(stats.mean, 1.75);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.argmax, Some((0, 1)));
        assert_eq!(stats.max_abs, 4.0);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_component_stats_negative_outlier() {
        let transformed = array![[0.5, -300.0], [0.1, 0.0]];
        let target = array![[0.0, 0.0], [0.0, 0.0]];
        let stats = ComponentStats::from_difference(&transformed, &target, false);

        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.argmax, Some((0, 0)));
        assert_eq!(stats.max_abs, 300.0);
    }

    #[test]
    fn test_component_stats_skips_non_finite() {
        let transformed = array![[f64::INFINITY, 1.0], [f64::NAN, 3.0]];
        let target = array![[0.0, 0.0], [0.0, 0.0]];
        let stats = ComponentStats::from_difference(&transformed, &target, false);

        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.sum, 4.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.argmax, Some((1, 1)));

        let all_bad = ComponentStats::from_difference(&array![[f64::NAN]], &array![[0.0]], false);
        assert_eq!(all_bad.argmax, None);
        assert!(all_bad.max_abs.is_nan());
        assert!(all_bad.mean.is_nan());
    }

    #[test]
    fn test_longitude_differences_wrap() {
        let stats = ComponentStats::from_difference(&array![[179.5]], &array![[-179.5]], true);
        assert!((stats.sum - -1.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_native_grid_is_consistent() {
        let params = GridParameters::new(12000.0, 12000.0, 20, 15).unwrap();
        let grid = reconstruct_grid(&params);
        let native = exact_native(&grid.grids, &lcc());

        let report =
            check_consistency(&grid.grids, &native, &lcc(), &ProjectionDescriptor::wgs84()).unwrap();

        assert_eq!(report.variants.len(), 3);
        for entry in &report.variants {
            assert!(entry.forward.target_is_geographic);
            assert!(!entry.inverse.target_is_geographic);
            assert!(entry.forward.x.max.abs() < 1e-9, "{}", entry.variant);
            assert!(entry.forward.y.max.abs() < 1e-9, "{}", entry.variant);
            // Round trip through lon/lat stays well under a micrometer
            assert!(entry.inverse.x.mean.abs() < 1e-6, "{}", entry.variant);
            assert!(entry.inverse.y.mean.abs() < 1e-6, "{}", entry.variant);
        }
    }

    #[test]
    fn test_each_variant_uses_its_own_data() {
        let params = GridParameters::new(12000.0, 12000.0, 8, 6).unwrap();
        let grid = reconstruct_grid(&params);
        let mut native = exact_native(&grid.grids, &lcc());
        native.u.lat += 0.5;

        let report =
            check_consistency(&grid.grids, &native, &lcc(), &ProjectionDescriptor::wgs84()).unwrap();

        let mass = report.variant(GridVariant::Mass).unwrap();
        let u = report.variant(GridVariant::U).unwrap();
        let v = report.variant(GridVariant::V).unwrap();
        assert!(mass.forward.y.mean.abs() < 1e-9);
        assert!(v.forward.y.mean.abs() < 1e-9);
        assert!((u.forward.y.mean + 0.5).abs() < 1e-9);
        assert!(u.inverse.y.mean > 1000.0);
    }

    #[test]
    fn test_single_southward_point_counts_as_worst_error() {
        let params = GridParameters::new(12000.0, 12000.0, 8, 6).unwrap();
        let grid = reconstruct_grid(&params);
        let mut native = exact_native(&grid.grids, &lcc());
        native.mass.lat[[2, 3]] -= 1.0;

        let report =
            check_consistency(&grid.grids, &native, &lcc(), &ProjectionDescriptor::wgs84()).unwrap();
        let mass = report.variant(GridVariant::Mass).unwrap();

        // Signed max only sees the matching points
        assert!(mass.inverse.y.max < 1.0);
        // About 111 km on the model sphere
        assert!(mass.inverse.y.max_abs > 100_000.0);
        assert!(report.worst_inverse_error() > params.dy);
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let params = GridParameters::new(12000.0, 12000.0, 8, 6).unwrap();
        let grid = reconstruct_grid(&params);
        let mut native = exact_native(&grid.grids, &lcc());
        native.v = native.mass.clone();

        assert!(matches!(
            check_consistency(&grid.grids, &native, &lcc(), &ProjectionDescriptor::wgs84()),
            Err(GridError::ShapeMismatch { .. })
        ));
    }
}
