//! Access to WRF model output.
//!
//! The grid tooling only needs named global attributes and a handful of 2D
//! (or time-indexed 3D) coordinate variables, so datasets are exposed through
//! the small [`WrfDataset`] trait:
//!
//! - [`MemoryDataset`]: in-memory attributes and arrays, loadable from a JSON
//!   dump. Used by tests and for small hand-made domains.
//! - `NetCdfDataset` (feature `netcdf`): a wrfout file read with the native
//!   netcdf library.
//!
//! # WRF coordinate variables
//!
//! WRF stores longitudes/latitudes as `XLONG`/`XLAT` on mass points and
//! `XLONG_U`/`XLAT_U`, `XLONG_V`/`XLAT_V` on the staggered points, each with a
//! leading `Time` dimension.

pub mod error;
pub mod memory;
#[cfg(feature = "netcdf")]
pub mod native;

use ndarray::{ArrayD, Array2, Axis, Ix2};
use serde::{Deserialize, Serialize};

pub use error::{DatasetError, DatasetResult};
pub use memory::MemoryDataset;
#[cfg(feature = "netcdf")]
pub use native::{silence_hdf5_errors, NetCdfDataset};

/// Names of the WRF global attributes and variables the grid tooling reads.
pub mod names {
    pub const MAP_PROJ: &str = "MAP_PROJ";
    pub const CEN_LON: &str = "CEN_LON";
    pub const CEN_LAT: &str = "CEN_LAT";
    pub const TRUELAT1: &str = "TRUELAT1";
    pub const TRUELAT2: &str = "TRUELAT2";
    pub const DX: &str = "DX";
    pub const DY: &str = "DY";
    pub const WE_PATCH_END_UNSTAG: &str = "WEST-EAST_PATCH_END_UNSTAG";
    pub const SN_PATCH_END_UNSTAG: &str = "SOUTH-NORTH_PATCH_END_UNSTAG";

    pub const XLONG: &str = "XLONG";
    pub const XLAT: &str = "XLAT";
    pub const XLONG_U: &str = "XLONG_U";
    pub const XLAT_U: &str = "XLAT_U";
    pub const XLONG_V: &str = "XLONG_V";
    pub const XLAT_V: &str = "XLAT_V";
}

/// Value of a global attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Text(_) => None,
        }
    }

    /// Integer value; floats qualify only when they hold a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            AttributeValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// A source of WRF global attributes and coordinate arrays.
pub trait WrfDataset {
    /// Description of where the data comes from, for logging.
    fn source(&self) -> &str;

    /// Look up a global attribute.
    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Read a whole variable as `f64`, in its stored shape.
    fn variable(&self, name: &str) -> DatasetResult<ArrayD<f64>>;

    /// Read a numeric global attribute.
    fn attribute_f64(&self, name: &str) -> DatasetResult<f64> {
        match self.attribute(name) {
            Some(value) => value.as_f64().ok_or_else(|| {
                DatasetError::InvalidFormat(format!("attribute {} is not numeric", name))
            }),
            None => Err(DatasetError::MissingAttribute(name.to_string())),
        }
    }

    /// Read an integer global attribute.
    fn attribute_i64(&self, name: &str) -> DatasetResult<i64> {
        match self.attribute(name) {
            Some(value) => value.as_i64().ok_or_else(|| {
                DatasetError::InvalidFormat(format!("attribute {} is not an integer", name))
            }),
            None => Err(DatasetError::MissingAttribute(name.to_string())),
        }
    }

    /// Read a horizontal coordinate field at one time step.
    ///
    /// 3D variables are `(Time, south_north, west_east)` and get sliced at
    /// `time_index`; 2D variables have no time axis and are returned as-is.
    fn coordinate_slice(&self, name: &str, time_index: usize) -> DatasetResult<Array2<f64>> {
        let data = self.variable(name)?;

        let field = match data.ndim() {
            2 => data,
            3 => {
                let len = data.len_of(Axis(0));
                if time_index >= len {
                    return Err(DatasetError::TimeIndexOutOfRange {
                        variable: name.to_string(),
                        index: time_index,
                        len,
                    });
                }
                data.index_axis(Axis(0), time_index).to_owned()
            }
            ndim => {
                return Err(DatasetError::InvalidFormat(format!(
                    "{} has {} dimensions, expected 2 or 3",
                    name, ndim
                )))
            }
        };

        field
            .into_dimensionality::<Ix2>()
            .map_err(|e| DatasetError::InvalidFormat(format!("{}: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array3};

    #[test]
    fn test_attribute_conversions() {
        assert_eq!(AttributeValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(AttributeValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(AttributeValue::Float(3.5).as_i64(), None);
        assert_eq!(AttributeValue::from("LCC").as_f64(), None);
    }

    #[test]
    fn test_typed_attribute_errors() {
        let ds = MemoryDataset::new("test")
            .with_attribute("TITLE", "OUTPUT FROM WRF")
            .with_attribute("DX", 12000.0);

        assert_eq!(ds.attribute_f64("DX").unwrap(), 12000.0);
        assert!(matches!(
            ds.attribute_f64("TITLE"),
            Err(DatasetError::InvalidFormat(_))
        ));
        assert!(matches!(
            ds.attribute_i64("MAP_PROJ"),
            Err(DatasetError::MissingAttribute(_))
        ));
    }

    #[test]
    fn test_coordinate_slice_selects_time_step() {
        let mut data = Array3::<f64>::zeros((2, 3, 4));
        data.index_axis_mut(Axis(0), 1).fill(7.0);
        let ds = MemoryDataset::new("test").with_variable(names::XLAT, data.into_dyn());

        let first = ds.coordinate_slice(names::XLAT, 0).unwrap();
        let second = ds.coordinate_slice(names::XLAT, 1).unwrap();
        assert_eq!(first.dim(), (3, 4));
        assert!(first.iter().all(|&v| v == 0.0));
        assert!(second.iter().all(|&v| v == 7.0));

        assert!(matches!(
            ds.coordinate_slice(names::XLAT, 2),
            Err(DatasetError::TimeIndexOutOfRange { len: 2, .. })
        ));
    }

    #[test]
    fn test_coordinate_slice_accepts_2d_and_rejects_1d() {
        let ds = MemoryDataset::new("test")
            .with_variable(names::XLONG, Array2::<f64>::ones((3, 4)).into_dyn())
            .with_variable("ZNU", Array::linspace(0.0, 1.0, 5).into_dyn());

        assert_eq!(ds.coordinate_slice(names::XLONG, 0).unwrap().dim(), (3, 4));
        assert!(matches!(
            ds.coordinate_slice("ZNU", 0),
            Err(DatasetError::InvalidFormat(_))
        ));
        assert!(matches!(
            ds.coordinate_slice(names::XLAT_V, 0),
            Err(DatasetError::MissingVariable(_))
        ));
    }
}
