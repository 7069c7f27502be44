//! Attribute-oriented records and datasets.

use serde::{Deserialize, Serialize};

use crate::attribute::Schema;
use crate::error::{ModelError, Result, check_weight};

/// A single cell of an attribute-oriented record.
///
/// Missing values are symbolic: [`Value::Missing`] is the only missing marker.
/// A `Numeric(NaN)` is also treated as missing, see [`Value::is_missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Missing,
    Numeric(f64),
    /// Label of a categorical attribute.
    Label(String),
    /// Payload of an unsupported attribute (string, date, ...).
    Text(String),
}

impl Value {
    /// Create a numeric value; `NaN` becomes [`Value::Missing`].
    pub fn numeric(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Numeric(value)
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Numeric(value) => value.is_nan(),
            _ => false,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Numeric(_) => "numeric",
            Self::Label(_) => "label",
            Self::Text(_) => "text",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::numeric(value)
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// An attribute-indexed record with a sample weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub values: Vec<Value>,
    pub weight: f64,
}

impl Instance {
    /// Create an instance with weight `1.0`.
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            weight: 1.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An attribute-oriented dataset: a schema and its instances.
///
/// Every instance has exactly one value per schema attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttributeDataset")]
pub struct AttributeDataset {
    schema: Schema,
    instances: Vec<Instance>,
}

#[derive(Deserialize)]
struct RawAttributeDataset {
    schema: Schema,
    #[serde(default)]
    instances: Vec<Instance>,
}

impl TryFrom<RawAttributeDataset> for AttributeDataset {
    type Error = ModelError;

    fn try_from(raw: RawAttributeDataset) -> Result<Self> {
        let mut dataset = AttributeDataset::with_capacity(raw.schema, raw.instances.len());
        for instance in raw.instances {
            dataset.push(instance)?;
        }
        Ok(dataset)
    }
}

impl AttributeDataset {
    /// Create an empty dataset.
    pub fn new(schema: Schema) -> Self {
        Self::with_capacity(schema, 0)
    }

    pub fn with_capacity(schema: Schema, capacity: usize) -> Self {
        Self {
            schema,
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Append an instance, checking its width against the schema and its
    /// weight.
    pub fn push(&mut self, instance: Instance) -> Result<()> {
        if instance.values.len() != self.schema.len() {
            return Err(ModelError::RowLength {
                field: "values",
                expected: self.schema.len(),
                actual: instance.values.len(),
            });
        }
        check_weight(instance.weight)?;
        self.instances.push(instance);
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Copy of this dataset without the instances whose target is missing.
    ///
    /// Returns an unchanged copy when no target is designated.
    pub fn without_missing_target(&self) -> Self {
        let Some(target) = self.schema.target_index() else {
            return self.clone();
        };
        Self {
            schema: self.schema.clone(),
            instances: self
                .instances
                .iter()
                .filter(|instance| !instance.values[target].is_missing())
                .cloned()
                .collect(),
        }
    }

    pub fn into_parts(self) -> (Schema, Vec<Instance>) {
        (self.schema, self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn schema() -> Schema {
        Schema::new(
            "weather",
            vec![
                Attribute::numeric("temperature"),
                Attribute::categorical("play", ["yes", "no"]),
            ],
            Some(1),
        )
        .unwrap()
    }

    #[test]
    fn nan_is_missing() {
        assert_eq!(Value::numeric(f64::NAN), Value::Missing);
        assert!(Value::Numeric(f64::NAN).is_missing());
        assert_eq!(Value::from(None::<f64>), Value::Missing);
        assert_eq!(Value::from(Some(2.5)), Value::Numeric(2.5));
    }

    #[test]
    fn push_checks_width() {
        let mut dataset = AttributeDataset::new(schema());
        let err = dataset
            .push(Instance::new(vec![Value::numeric(1.0)]))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::RowLength {
                field: "values",
                expected: 2,
                actual: 1
            }
        );
        assert!(dataset.is_empty());
    }

    #[test]
    fn push_rejects_invalid_weights() {
        let mut dataset = AttributeDataset::new(schema());
        let err = dataset
            .push(Instance::new(vec![20.0.into(), "yes".into()]).with_weight(-2.0))
            .unwrap_err();
        assert_eq!(err, ModelError::InvalidWeight { weight: -2.0 });
        assert!(
            dataset
                .push(Instance::new(vec![20.0.into(), "yes".into()]).with_weight(f64::NAN))
                .is_err()
        );
        assert!(dataset.is_empty());
    }

    #[test]
    fn drops_instances_with_missing_target() {
        let mut dataset = AttributeDataset::new(schema());
        dataset
            .push(Instance::new(vec![20.0.into(), "yes".into()]))
            .unwrap();
        dataset
            .push(Instance::new(vec![21.0.into(), Value::Missing]))
            .unwrap();
        let filtered = dataset.without_missing_target();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.instances()[0].values[1], Value::label("yes"));
    }
}
