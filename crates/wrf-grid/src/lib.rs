//! WRF grid reconstruction and consistency checking.
//!
//! WRF output stores its horizontal grid twice: implicitly, through the
//! Lambert Conformal projection parameters and grid spacing in the global
//! attributes, and explicitly, as irregular 2D longitude/latitude fields.
//! This crate rebuilds the regular grid from the first representation and
//! cross-checks it against the second.
//!
//! # Pipeline
//!
//! ```text
//! WrfDataset
//!      │
//!      ├─► build_projection ─────────┐
//!      │                             │
//!      ├─► extract_grid_parameters   │
//!      │         │                   │
//!      │         ▼                   │
//!      │   reconstruct_grid ──► axes + mesh grids (mass, u, v)
//!      │                             │
//!      └─► load_native_grids ──► XLONG/XLAT (mass, u, v)
//!                                    │
//!                                    ▼
//!                           check_consistency ──► DiscrepancyReport
//! ```
//!
//! [`reproduce_grid`] runs the whole sequence.
//!
//! # Example
//!
//! ```ignore
//! use wrf_dataset::MemoryDataset;
//! use wrf_grid::{reproduce_grid, GridCheckConfig};
//!
//! let dataset = MemoryDataset::from_json_file("wrfout_d01.json")?;
//! let grid = reproduce_grid(&dataset, &GridCheckConfig::default())?;
//! println!("{}", grid.report);
//! ```

pub mod config;
pub mod consistency;
pub mod error;
pub mod native;
pub mod params;
pub mod pipeline;
pub mod proj;
pub mod reconstruct;
pub mod report;
pub mod stats;

// Re-export commonly used types at crate root
pub use config::{GridCheckConfig, ReferenceDatum};
pub use consistency::{
    check_consistency, ComponentStats, DirectionStats, DiscrepancyReport, TransformDirection,
    VariantReport,
};
pub use error::{GridError, Result};
pub use native::{load_native_grids, GeoGrid, GeoGrids};
pub use params::extract_grid_parameters;
pub use pipeline::{reproduce_grid, ReproducedGrid};
pub use proj::{build_projection, reference_projections, ReferenceProjections};
pub use reconstruct::{make_axis, reconstruct_grid, CoordinateAxes, MeshGrid, MeshGrids, ReconstructedGrid};
pub use report::log_report;
pub use stats::{nanmean, weighted_nanmean, StatsError, Weights};

pub use wrf_common::{GridParameters, GridVariant, ProjectionDescriptor};
