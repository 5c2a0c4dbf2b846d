//! In-memory WRF dataset.
//!
//! Holds global attributes and variables in hash maps. A dataset can be
//! dumped to and loaded from JSON:
//!
//! ```json
//! {
//!   "attributes": { "MAP_PROJ": 1, "DX": 12000.0 },
//!   "variables": { "XLAT": { "shape": [1, 2, 2], "data": [50.0, 50.0, 51.0, 51.0] } }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};
use crate::{AttributeValue, WrfDataset};

/// WRF dataset held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    source: String,
    attributes: HashMap<String, AttributeValue>,
    variables: HashMap<String, ArrayD<f64>>,
}

/// Serialized form of a variable.
#[derive(Debug, Serialize, Deserialize)]
struct VariableDump {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Serialized form of a whole dataset.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DatasetDump {
    #[serde(default)]
    attributes: HashMap<String, AttributeValue>,
    #[serde(default)]
    variables: HashMap<String, VariableDump>,
}

impl MemoryDataset {
    /// Create an empty dataset.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Add or replace a global attribute.
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Add or replace a variable.
    pub fn with_variable(mut self, name: &str, data: ArrayD<f64>) -> Self {
        self.variables.insert(name.to_string(), data);
        self
    }

    /// Drop a variable, returning it if it was present.
    pub fn remove_variable(&mut self, name: &str) -> Option<ArrayD<f64>> {
        self.variables.remove(name)
    }

    /// Drop a global attribute, returning it if it was present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    /// Mutable access to a stored variable.
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut ArrayD<f64>> {
        self.variables.get_mut(name)
    }

    /// Parse a JSON dataset dump.
    pub fn from_json_str(json: &str, source: impl Into<String>) -> DatasetResult<Self> {
        let dump: DatasetDump = serde_json::from_str(json)?;

        let mut variables = HashMap::with_capacity(dump.variables.len());
        for (name, var) in dump.variables {
            let expected: usize = var.shape.iter().product();
            if expected != var.data.len() {
                return Err(DatasetError::InvalidFormat(format!(
                    "{}: shape {:?} needs {} values, found {}",
                    name,
                    var.shape,
                    expected,
                    var.data.len()
                )));
            }
            let array = ArrayD::from_shape_vec(IxDyn(&var.shape), var.data)
                .map_err(|e| DatasetError::InvalidFormat(format!("{}: {}", name, e)))?;
            variables.insert(name, array);
        }

        Ok(Self {
            source: source.into(),
            attributes: dump.attributes,
            variables,
        })
    }

    /// Load a JSON dataset dump from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&json, path.display().to_string())?;
        debug!(
            path = %path.display(),
            attributes = dataset.attributes.len(),
            variables = dataset.variables.len(),
            "Loaded JSON dataset"
        );
        Ok(dataset)
    }

    /// Serialize the dataset as a JSON dump.
    pub fn to_json_string(&self) -> DatasetResult<String> {
        let dump = DatasetDump {
            attributes: self.attributes.clone(),
            variables: self
                .variables
                .iter()
                .map(|(name, data)| {
                    (
                        name.clone(),
                        VariableDump {
                            shape: data.shape().to_vec(),
                            data: data.iter().copied().collect(),
                        },
                    )
                })
                .collect(),
        };
        Ok(serde_json::to_string(&dump)?)
    }
}

impl WrfDataset for MemoryDataset {
    fn source(&self) -> &str {
        &self.source
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.get(name).cloned()
    }

    fn variable(&self, name: &str) -> DatasetResult<ArrayD<f64>> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| DatasetError::MissingVariable(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    const DUMP: &str = r#"{
        "attributes": { "MAP_PROJ": 1, "DX": 12000.0, "TITLE": "OUTPUT FROM WRF" },
        "variables": {
            "XLAT": { "shape": [1, 2, 2], "data": [50.0, 50.0, 51.0, 51.0] }
        }
    }"#;

    #[test]
    fn test_from_json_str() {
        let ds = MemoryDataset::from_json_str(DUMP, "inline").unwrap();
        assert_eq!(ds.source(), "inline");
        assert_eq!(ds.attribute_i64(names::MAP_PROJ).unwrap(), 1);
        assert_eq!(ds.attribute_f64(names::DX).unwrap(), 12000.0);

        let lat = ds.coordinate_slice(names::XLAT, 0).unwrap();
        assert_eq!(lat.dim(), (2, 2));
        assert_eq!(lat[[1, 0]], 51.0);
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let json = r#"{ "variables": { "XLAT": { "shape": [2, 2], "data": [1.0] } } }"#;
        let err = MemoryDataset::from_json_str(json, "inline").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed_text() {
        let err = MemoryDataset::from_json_str("{ \"attributes\": ", "inline").unwrap_err();
        assert!(matches!(err, DatasetError::JsonError(_)));

        let err = MemoryDataset::from_json_file("/nonexistent/wrfout_d01.json").unwrap_err();
        assert!(matches!(err, DatasetError::IoError(_)));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let ds = MemoryDataset::from_json_str(DUMP, "inline").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrfout.json");
        std::fs::write(&path, ds.to_json_string().unwrap()).unwrap();

        let loaded = MemoryDataset::from_json_file(&path).unwrap();
        assert_eq!(
            loaded.attribute("TITLE"),
            Some(AttributeValue::Text("OUTPUT FROM WRF".to_string()))
        );
        assert_eq!(
            loaded.variable(names::XLAT).unwrap(),
            ds.variable(names::XLAT).unwrap()
        );
    }

    #[test]
    fn test_remove_variable() {
        let mut ds = MemoryDataset::from_json_str(DUMP, "inline").unwrap();
        assert!(ds.remove_variable(names::XLAT).is_some());
        assert!(matches!(
            ds.variable(names::XLAT),
            Err(DatasetError::MissingVariable(_))
        ));
    }
}
