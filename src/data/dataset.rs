//! Dataset metadata as reported by the inspection script.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered JSON mapping used for attributes and encodings.
pub type ValueMap = Map<String, Value>;

/// A named dimension and its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Number of entries along the dimension.
    pub size: u64,
}

/// Metadata for one coordinate or data variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Key the variable was listed under.
    pub name: String,
    /// Dimension names, in shape order.
    #[serde(default)]
    pub dims: Vec<String>,
    /// Extent along each dimension, when reported.
    #[serde(default)]
    pub shape: Option<Vec<u64>>,
    /// Element type as reported by the inspector.
    #[serde(default)]
    pub dtype: Option<String>,
    /// Variable attributes.
    #[serde(default)]
    pub attrs: ValueMap,
    /// On-disk storage parameters.
    #[serde(default)]
    pub encoding: ValueMap,
    /// Prefix of the flattened values.
    #[serde(default)]
    pub sample_data: Vec<Value>,
}

/// Structural metadata of one inspected file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dimensions in source order.
    #[serde(default)]
    pub dims: Vec<Dimension>,
    /// Coordinate variables in source order.
    #[serde(default)]
    pub coords: Vec<Variable>,
    /// Data variables in source order.
    #[serde(default)]
    pub data_vars: Vec<Variable>,
    /// Global attributes.
    #[serde(default)]
    pub attrs: ValueMap,
}

impl Dataset {
    /// Build a dataset from the inspector's JSON document.
    ///
    /// Missing or mistyped sections are treated as empty. Mapping order is
    /// preserved as written by the inspector.
    pub fn from_json(value: &Value) -> Self {
        let dims = value
            .get("dims")
            .and_then(Value::as_object)
            .map(|dims| {
                dims.iter()
                    .filter_map(|(name, size)| match size.as_u64() {
                        Some(size) => Some(Dimension {
                            name: name.clone(),
                            size,
                        }),
                        None => {
                            tracing::warn!("Skipping dimension {} with size {}", name, size);
                            None
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            dims,
            coords: variables_from_json(value.get("coords")),
            data_vars: variables_from_json(value.get("data_vars")),
            attrs: object_or_empty(value.get("attrs")),
        }
    }

    /// Find a variable by name, searching coordinates first.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.coords
            .iter()
            .chain(self.data_vars.iter())
            .find(|var| var.name == name)
    }
}

impl Variable {
    /// Build a variable from its JSON record, keyed externally by `name`.
    ///
    /// Non-object records yield an empty variable that still carries the name.
    pub fn from_json(name: &str, value: &Value) -> Self {
        let Some(record) = value.as_object() else {
            return Self {
                name: name.to_string(),
                ..Self::default()
            };
        };

        let dims = record
            .get("dims")
            .and_then(Value::as_array)
            .map(|dims| {
                dims.iter()
                    .map(|d| match d {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let shape = record.get("shape").and_then(Value::as_array).and_then(|shape| {
            shape.iter().map(Value::as_u64).collect::<Option<Vec<u64>>>()
        });

        let dtype = record
            .get("dtype")
            .or_else(|| record.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let sample_data = record
            .get("sample_data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self {
            name: name.to_string(),
            dims,
            shape,
            dtype,
            attrs: object_or_empty(record.get("attrs")),
            encoding: object_or_empty(record.get("encoding")),
            sample_data,
        }
    }

    /// Pair each dimension with its extent, e.g. `time (4) × lat (2)`.
    ///
    /// Falls back to the bare names when no shape was reported.
    pub fn dims_summary(&self) -> String {
        match &self.shape {
            Some(shape) => self
                .dims
                .iter()
                .enumerate()
                .map(|(i, dim)| match shape.get(i) {
                    Some(size) => format!("{} ({})", dim, size),
                    None => format!("{} (?)", dim),
                })
                .collect::<Vec<_>>()
                .join(" × "),
            None => self.dims.join(" × "),
        }
    }

    /// Element type, or `?` when unknown.
    pub fn type_name(&self) -> &str {
        self.dtype.as_deref().unwrap_or("?")
    }

    /// The displayed prefix of `sample_data`.
    pub fn samples(&self) -> &[Value] {
        let end = self.sample_data.len().min(super::MAX_SAMPLES);
        &self.sample_data[..end]
    }
}

fn variables_from_json(value: Option<&Value>) -> Vec<Variable> {
    value
        .and_then(Value::as_object)
        .map(|vars| {
            vars.iter()
                .map(|(name, record)| Variable::from_json(name, record))
                .collect()
        })
        .unwrap_or_default()
}

fn object_or_empty(value: Option<&Value>) -> ValueMap {
    value
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
