//! Directional converters.
//!
//! Each converter starts uninitialized. `initialize` captures a
//! [`ConversionContext`]; every later conversion reads it and fails with
//! [`ConvertError::NotInitialized`] until then. Re-initializing replaces the
//! context.

use tbridge_model::{AttributeDataset, DataPoint, Instance, Schema, VectorDataset, VectorLayout};
use tracing::info;

use crate::assemble::DatasetAssembler;
use crate::classify::TargetRole;
use crate::context::ConversionContext;
use crate::error::{ConvertError, Result};
use crate::options::ConversionOptions;
use crate::row::{RowConverter, VectorRecord};

/// Attribute-oriented → vector-oriented converter.
#[derive(Debug, Clone, Default)]
pub struct AttributeToVector {
    context: Option<ConversionContext>,
}

impl AttributeToVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context from `schema`, replacing any previous one.
    pub fn initialize(&mut self, schema: &Schema) -> Result<&ConversionContext> {
        let context = ConversionContext::from_schema(schema)?;
        log_initialized(&context);
        Ok(self.context.insert(context))
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Result<&ConversionContext> {
        self.context.as_ref().ok_or(ConvertError::NotInitialized)
    }

    /// Convert one instance of the initialized schema.
    pub fn convert_record(&self, instance: &Instance) -> Result<VectorRecord> {
        RowConverter::new(self.context()?).convert_instance(instance)
    }

    /// Convert a dataset whose schema is compatible with the initialized one.
    pub fn convert_dataset(&self, dataset: &AttributeDataset) -> Result<VectorDataset> {
        DatasetAssembler::new(self.context()?).assemble_vector(dataset)
    }
}

/// Vector-oriented → attribute-oriented converter.
#[derive(Debug, Clone, Default)]
pub struct VectorToAttribute {
    options: ConversionOptions,
    context: Option<ConversionContext>,
}

impl VectorToAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            context: None,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Build the context from `layout`, replacing any previous one.
    pub fn initialize(&mut self, layout: &VectorLayout) -> Result<&ConversionContext> {
        let context = ConversionContext::from_layout(layout, &self.options)?;
        log_initialized(&context);
        Ok(self.context.insert(context))
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Result<&ConversionContext> {
        self.context.as_ref().ok_or(ConvertError::NotInitialized)
    }

    /// Convert one data point into an instance of the canonical schema.
    ///
    /// A data point does not carry its target, so the target attribute of
    /// the result is always missing. Use
    /// [`convert_dataset`](Self::convert_dataset) to keep targets.
    pub fn convert_record(&self, point: &DataPoint) -> Result<Instance> {
        RowConverter::new(self.context()?).convert_point(point, None)
    }

    /// Convert a dataset whose layout is compatible with the initialized one.
    pub fn convert_dataset(&self, dataset: &VectorDataset) -> Result<AttributeDataset> {
        DatasetAssembler::new(self.context()?).assemble_attribute(dataset)
    }
}

/// Convert an attribute-oriented dataset in one step.
pub fn to_vector_dataset(dataset: &AttributeDataset) -> Result<VectorDataset> {
    let mut converter = AttributeToVector::new();
    converter.initialize(dataset.schema())?;
    converter.convert_dataset(dataset)
}

/// Convert a vector-oriented dataset in one step.
pub fn to_attribute_dataset(
    dataset: &VectorDataset,
    options: &ConversionOptions,
) -> Result<AttributeDataset> {
    let mut converter = VectorToAttribute::with_options(options.clone());
    converter.initialize(dataset.layout())?;
    converter.convert_dataset(dataset)
}

fn log_initialized(context: &ConversionContext) {
    let layout = context.layout();
    info!(
        relation = context.schema().name(),
        numeric = layout.numeric_count(),
        categorical = layout.categorical_count(),
        skipped = context.partition().skipped.len(),
        target = context.partition().target_role().map_or("none", TargetRole::as_str),
        "converter initialized"
    );
}
