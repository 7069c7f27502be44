//! Whole-dataset conversion.

use tbridge_model::{AttributeDataset, VectorDataset};
use tracing::{debug, debug_span, warn};

use crate::context::ConversionContext;
use crate::error::{ConvertError, Result};
use crate::row::RowConverter;

/// Converts whole datasets against a [`ConversionContext`], preserving record
/// order and weights.
#[derive(Debug, Clone, Copy)]
pub struct DatasetAssembler<'a> {
    rows: RowConverter<'a>,
}

impl<'a> DatasetAssembler<'a> {
    pub fn new(context: &'a ConversionContext) -> Self {
        Self {
            rows: RowConverter::new(context),
        }
    }

    /// Build a vector dataset from an attribute-side dataset.
    ///
    /// The dataset schema must be compatible with the context's schema;
    /// nothing is converted otherwise.
    pub fn assemble_vector(&self, dataset: &AttributeDataset) -> Result<VectorDataset> {
        let context = self.rows.context();
        if !context.schema().is_compatible_with(dataset.schema()) {
            return Err(ConvertError::SchemaMismatch {
                expected: ConversionContext::describe_schema(context.schema()),
                found: ConversionContext::describe_schema(dataset.schema()),
            });
        }

        let span = debug_span!("assemble_vector", relation = dataset.schema().name());
        let _guard = span.enter();

        let mut output = VectorDataset::with_capacity(context.layout().clone(), dataset.len());
        for (row, instance) in dataset.instances().iter().enumerate() {
            let record = self.rows.convert_instance(instance).inspect_err(|error| {
                warn!(row, %error, "record conversion failed");
            })?;
            output.push(record.point, record.target)?;
        }
        debug!(records = output.len(), "assembled vector dataset");
        Ok(output)
    }

    /// Build an attribute-side dataset from a vector dataset.
    ///
    /// Each record's target is taken from the dataset's target column. The
    /// dataset layout must be compatible with the context's layout.
    pub fn assemble_attribute(&self, dataset: &VectorDataset) -> Result<AttributeDataset> {
        let context = self.rows.context();
        if !context.layout().is_compatible_with(dataset.layout()) {
            return Err(ConvertError::SchemaMismatch {
                expected: ConversionContext::describe_layout(context.layout()),
                found: ConversionContext::describe_layout(dataset.layout()),
            });
        }

        let span = debug_span!("assemble_attribute", records = dataset.len());
        let _guard = span.enter();

        let mut output = AttributeDataset::with_capacity(context.schema().clone(), dataset.len());
        for (row, point) in dataset.points().iter().enumerate() {
            let instance = self
                .rows
                .convert_point(point, dataset.target_value(row))
                .inspect_err(|error| {
                    warn!(row, %error, "record conversion failed");
                })?;
            output.push(instance)?;
        }
        debug!(records = output.len(), "assembled attribute dataset");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbridge_model::{Attribute, Instance, Schema, Value};

    fn schema(target: Option<usize>) -> Schema {
        Schema::new(
            "pair",
            vec![Attribute::numeric("x"), Attribute::categorical("y", ["a", "b"])],
            target,
        )
        .unwrap()
    }

    #[test]
    fn preserves_order_and_weights() {
        let context = ConversionContext::from_schema(&schema(None)).unwrap();
        let mut dataset = AttributeDataset::new(schema(None));
        dataset
            .push(Instance::new(vec![Value::numeric(1.0), Value::label("b")]).with_weight(0.5))
            .unwrap();
        dataset
            .push(Instance::new(vec![Value::numeric(2.0), Value::label("a")]))
            .unwrap();

        let assembler = DatasetAssembler::new(&context);
        let vectors = assembler.assemble_vector(&dataset).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors.points()[0].categorical, vec![1]);
        assert_eq!(vectors.points()[0].weight, 0.5);
        assert_eq!(vectors.points()[1].numeric, vec![2.0]);
        assert!(vectors.targets().is_empty());

        let back = assembler.assemble_attribute(&vectors).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn mismatch_is_reported_before_any_record() {
        let context = ConversionContext::from_schema(&schema(None)).unwrap();
        let dataset = AttributeDataset::new(schema(Some(1)));
        let err = DatasetAssembler::new(&context)
            .assemble_vector(&dataset)
            .unwrap_err();
        assert!(matches!(err, ConvertError::SchemaMismatch { .. }));
    }

    #[test]
    fn empty_dataset_converts_to_empty() {
        let context = ConversionContext::from_schema(&schema(Some(1))).unwrap();
        let dataset = AttributeDataset::new(schema(Some(1)));
        let vectors = DatasetAssembler::new(&context)
            .assemble_vector(&dataset)
            .unwrap();
        assert!(vectors.is_empty());
        assert!(vectors.layout().target().is_some());
    }
}
