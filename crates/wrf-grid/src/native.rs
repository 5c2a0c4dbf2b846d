//! The model's own longitude/latitude fields.

use ndarray::Array2;
use tracing::debug;
use wrf_common::GridVariant;
use wrf_dataset::{names, WrfDataset};

use crate::error::{GridError, Result};

/// Longitudes and latitudes (degrees) of one grid variant.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
}

impl GeoGrid {
    pub fn dim(&self) -> (usize, usize) {
        self.lon.dim()
    }
}

/// Native coordinates for the mass and both staggered grids.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrids {
    pub mass: GeoGrid,
    pub u: GeoGrid,
    pub v: GeoGrid,
}

impl GeoGrids {
    pub fn get(&self, variant: GridVariant) -> &GeoGrid {
        match variant {
            GridVariant::Mass => &self.mass,
            GridVariant::U => &self.u,
            GridVariant::V => &self.v,
        }
    }
}

/// Variable names holding (longitude, latitude) for a variant.
fn field_names(variant: GridVariant) -> (&'static str, &'static str) {
    match variant {
        GridVariant::Mass => (names::XLONG, names::XLAT),
        GridVariant::U => (names::XLONG_U, names::XLAT_U),
        GridVariant::V => (names::XLONG_V, names::XLAT_V),
    }
}

fn load_variant<D: WrfDataset + ?Sized>(
    dataset: &D,
    variant: GridVariant,
    time_index: usize,
) -> Result<GeoGrid> {
    let (lon_name, lat_name) = field_names(variant);

    let lon = dataset
        .coordinate_slice(lon_name, time_index)
        .map_err(GridError::from_coordinate_field)?;
    let lat = dataset
        .coordinate_slice(lat_name, time_index)
        .map_err(GridError::from_coordinate_field)?;

    if lon.dim() != lat.dim() {
        return Err(GridError::shape_mismatch(
            format!("{} vs {}", lon_name, lat_name),
            lon.dim(),
            lat.dim(),
        ));
    }

    Ok(GeoGrid { lon, lat })
}

/// Read the stored lon/lat arrays at one time step.
pub fn load_native_grids<D: WrfDataset + ?Sized>(dataset: &D, time_index: usize) -> Result<GeoGrids> {
    let grids = GeoGrids {
        mass: load_variant(dataset, GridVariant::Mass, time_index)?,
        u: load_variant(dataset, GridVariant::U, time_index)?,
        v: load_variant(dataset, GridVariant::V, time_index)?,
    };

    debug!(
        source = dataset.source(),
        time_index,
        mass = ?grids.mass.dim(),
        u = ?grids.u.dim(),
        v = ?grids.v.dim(),
        "Loaded native grids"
    );

    Ok(grids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use wrf_dataset::MemoryDataset;

    fn dataset() -> MemoryDataset {
        let field = |rows, cols, value| Array3::from_elem((2, rows, cols), value).into_dyn();
        MemoryDataset::new("native-test")
            .with_variable(names::XLONG, field(3, 4, 10.0))
            .with_variable(names::XLAT, field(3, 4, 50.0))
            .with_variable(names::XLONG_U, field(3, 5, 11.0))
            .with_variable(names::XLAT_U, field(3, 5, 51.0))
            .with_variable(names::XLONG_V, field(4, 4, 12.0))
            .with_variable(names::XLAT_V, field(4, 4, 52.0))
    }

    #[test]
    fn test_loads_each_variant() {
        let grids = load_native_grids(&dataset(), 1).unwrap();
        assert_eq!(grids.mass.dim(), (3, 4));
        assert_eq!(grids.u.dim(), (3, 5));
        assert_eq!(grids.v.dim(), (4, 4));
        assert_eq!(grids.get(GridVariant::U).lat[[0, 0]], 51.0);
        assert_eq!(grids.get(GridVariant::V).lon[[0, 0]], 12.0);
    }

    #[test]
    fn test_missing_field() {
        let mut ds = dataset();
        ds.remove_variable(names::XLAT_U);
        match load_native_grids(&ds, 0) {
            Err(GridError::MissingCoordinateField(name)) => assert_eq!(name, names::XLAT_U),
            other => panic!("expected MissingCoordinateField, got {:?}", other),
        }
    }

    #[test]
    fn test_time_index_out_of_range() {
        assert!(matches!(
            load_native_grids(&dataset(), 5),
            Err(GridError::Dataset(_))
        ));
    }

    #[test]
    fn test_lon_lat_shape_mismatch() {
        let ds = dataset().with_variable(names::XLAT, Array3::<f64>::zeros((2, 3, 3)).into_dyn());
        assert!(matches!(
            load_native_grids(&ds, 0),
            Err(GridError::ShapeMismatch { .. })
        ));
    }
}
