//! wrfout reading using the native netcdf library.
//!
//! The netcdf library wraps libnetcdf/HDF5 and needs a file path, so datasets
//! are opened from disk and kept open for the lifetime of [`NetCdfDataset`].

use std::path::Path;
use std::sync::Once;

use ndarray::{ArrayD, IxDyn};
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};
use crate::{AttributeValue, WrfDataset};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing for optional
/// attributes). This disables that output by calling H5Eset_auto2 with null
/// handlers. Safe to call multiple times; only the first call does anything.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A wrfout file opened with the netcdf library.
pub struct NetCdfDataset {
    file: netcdf::File,
    source: String,
}

impl NetCdfDataset {
    /// Open a wrfout NetCDF file.
    pub fn open(path: impl AsRef<Path>) -> DatasetResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let file = netcdf::open(path)
            .map_err(|e| DatasetError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

        debug!(path = %path.display(), "Opened wrfout file");

        Ok(Self {
            file,
            source: path.display().to_string(),
        })
    }

    /// Check for a global attribute without triggering HDF5 error output.
    fn has_attr(&self, name: &str) -> bool {
        self.file.attributes().any(|attr| attr.name() == name)
    }
}

/// Convert a netcdf attribute value, unwrapping single-element arrays.
fn convert_attribute(value: netcdf::AttributeValue) -> Option<AttributeValue> {
    use netcdf::AttributeValue as Nc;

    match value {
        Nc::Schar(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Uchar(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Short(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Ushort(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Int(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Uint(v) => Some(AttributeValue::Int(v as i64)),
        Nc::Longlong(v) => Some(AttributeValue::Int(v)),
        Nc::Float(v) => Some(AttributeValue::Float(v as f64)),
        Nc::Double(v) => Some(AttributeValue::Float(v)),
        Nc::Str(v) => Some(AttributeValue::Text(v)),
        Nc::Ints(v) if v.len() == 1 => Some(AttributeValue::Int(v[0] as i64)),
        Nc::Floats(v) if v.len() == 1 => Some(AttributeValue::Float(v[0] as f64)),
        Nc::Doubles(v) if v.len() == 1 => Some(AttributeValue::Float(v[0])),
        _ => None,
    }
}

impl WrfDataset for NetCdfDataset {
    fn source(&self) -> &str {
        &self.source
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        if !self.has_attr(name) {
            return None;
        }
        let value = self.file.attribute(name)?.value().ok()?;
        convert_attribute(value)
    }

    fn variable(&self, name: &str) -> DatasetResult<ArrayD<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| DatasetError::MissingVariable(name.to_string()))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();

        // Read all extents; libnetcdf converts the stored float32 to f64
        let values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| DatasetError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

        ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|e| DatasetError::InvalidFormat(format!("{}: {}", name, e)))
    }
}
