//! Single-record conversion.

use tbridge_model::{DataPoint, Instance, MISSING_CODE, TargetValue, Value, is_missing_code};

use crate::codec::CodeMap;
use crate::context::{ConversionContext, TargetCodec};
use crate::error::{ConvertError, Result};

/// A converted attribute-side record: the data point and, when the context
/// has a target, its target value.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub point: DataPoint,
    pub target: Option<TargetValue>,
}

/// Converts single records against a [`ConversionContext`].
#[derive(Debug, Clone, Copy)]
pub struct RowConverter<'a> {
    context: &'a ConversionContext,
}

impl<'a> RowConverter<'a> {
    pub fn new(context: &'a ConversionContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'a ConversionContext {
        self.context
    }

    /// Convert an attribute-side instance into a data point and target value.
    ///
    /// Skipped attributes are ignored. Missing values become `NaN` or the
    /// missing code; the weight is carried over.
    pub fn convert_instance(&self, instance: &Instance) -> Result<VectorRecord> {
        let schema = self.context.schema();
        check_width("values", schema.len(), instance.len())?;
        let partition = self.context.partition();
        let attributes = schema.attributes();

        let numeric = partition
            .numeric_indices
            .iter()
            .map(|&index| real_of(&attributes[index].name, &instance.values[index]))
            .collect::<Result<Vec<_>>>()?;
        let categorical = partition
            .categorical_indices
            .iter()
            .zip(self.context.codecs())
            .map(|(&index, codec)| code_of(codec, &instance.values[index]))
            .collect::<Result<Vec<_>>>()?;

        let target = match (&partition.target, self.context.target_codec()) {
            (Some(slot), Some(TargetCodec::Regression { name })) => {
                Some(TargetValue::Real(real_of(name, &instance.values[slot.index])?))
            }
            (Some(slot), Some(TargetCodec::Classification(codec))) => {
                Some(TargetValue::Code(code_of(codec, &instance.values[slot.index])?))
            }
            _ => None,
        };

        Ok(VectorRecord {
            point: DataPoint::new(numeric, categorical).with_weight(instance.weight),
            target,
        })
    }

    /// Convert a data point into an instance of the context's schema.
    ///
    /// Without a `target` the target attribute is left missing; a bare data
    /// point does not carry its target. Skipped attributes are missing too.
    pub fn convert_point(&self, point: &DataPoint, target: Option<TargetValue>) -> Result<Instance> {
        let layout = self.context.layout();
        check_width("numeric", layout.numeric_count(), point.numeric.len())?;
        check_width(
            "categorical",
            layout.categorical_count(),
            point.categorical.len(),
        )?;

        let partition = self.context.partition();
        let mut values = vec![Value::Missing; self.context.schema().len()];
        for (&index, &real) in partition.numeric_indices.iter().zip(&point.numeric) {
            values[index] = Value::numeric(real);
        }
        for ((&index, &code), codec) in partition
            .categorical_indices
            .iter()
            .zip(&point.categorical)
            .zip(self.context.codecs())
        {
            values[index] = label_of(codec, code)?;
        }

        if let Some(target) = target {
            let (Some(slot), Some(codec)) = (&partition.target, self.context.target_codec())
            else {
                return Err(ConvertError::UnexpectedTarget {
                    found: target_kind(target),
                });
            };
            values[slot.index] = match (codec, target) {
                (TargetCodec::Regression { .. }, TargetValue::Real(real)) => Value::numeric(real),
                (TargetCodec::Classification(codec), TargetValue::Code(code)) => {
                    label_of(codec, code)?
                }
                (TargetCodec::Regression { name }, _) => {
                    return Err(ConvertError::UnexpectedValue {
                        attribute: name.clone(),
                        expected: "real target",
                        found: target_kind(target),
                    });
                }
                (TargetCodec::Classification(codec), _) => {
                    return Err(ConvertError::UnexpectedValue {
                        attribute: codec.attribute().to_string(),
                        expected: "code target",
                        found: target_kind(target),
                    });
                }
            };
        }

        Ok(Instance::new(values).with_weight(point.weight))
    }
}

fn check_width(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ConvertError::RecordShape {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn target_kind(target: TargetValue) -> &'static str {
    match target {
        TargetValue::Real(_) => "real target",
        TargetValue::Code(_) => "code target",
    }
}

fn real_of(attribute: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Missing => Ok(f64::NAN),
        Value::Numeric(real) => Ok(*real),
        other => Err(ConvertError::UnexpectedValue {
            attribute: attribute.to_string(),
            expected: "numeric",
            found: other.kind_name(),
        }),
    }
}

fn code_of(codec: &CodeMap, value: &Value) -> Result<i32> {
    match value {
        Value::Missing => Ok(MISSING_CODE),
        Value::Label(label) => codec.encode(label),
        other => Err(ConvertError::UnexpectedValue {
            attribute: codec.attribute().to_string(),
            expected: "label",
            found: other.kind_name(),
        }),
    }
}

fn label_of(codec: &CodeMap, code: i32) -> Result<Value> {
    if is_missing_code(code) {
        return Ok(Value::Missing);
    }
    codec.decode(code).map(Value::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbridge_model::{Attribute, Schema};

    fn context() -> ConversionContext {
        let schema = Schema::new(
            "shop",
            vec![
                Attribute::categorical("color", ["red", "green", "blue"]),
                Attribute::numeric("price"),
                Attribute::unsupported("note", "string"),
                Attribute::categorical("sold", ["yes", "no"]),
            ],
            Some(3),
        )
        .unwrap();
        ConversionContext::from_schema(&schema).unwrap()
    }

    #[test]
    fn to_vector_reorders_and_encodes() {
        let context = context();
        let rows = RowConverter::new(&context);
        let instance = Instance::new(vec![
            Value::label("blue"),
            Value::numeric(4.5),
            Value::text("fresh"),
            Value::label("no"),
        ])
        .with_weight(2.0);
        let record = rows.convert_instance(&instance).unwrap();
        assert_eq!(record.point.numeric, vec![4.5]);
        assert_eq!(record.point.categorical, vec![2]);
        assert_eq!(record.point.weight, 2.0);
        assert_eq!(record.target, Some(TargetValue::Code(1)));
    }

    #[test]
    fn missing_values_map_to_sentinels() {
        let context = context();
        let rows = RowConverter::new(&context);
        let instance = Instance::new(vec![Value::Missing; 4]);
        let record = rows.convert_instance(&instance).unwrap();
        assert!(record.point.numeric[0].is_nan());
        assert_eq!(record.point.categorical, vec![MISSING_CODE]);
        assert_eq!(record.target, Some(TargetValue::Code(MISSING_CODE)));

        let back = rows.convert_point(&record.point, record.target).unwrap();
        assert!(back.values.iter().all(Value::is_missing));
    }

    #[test]
    fn to_attribute_restores_source_positions() {
        let context = context();
        let rows = RowConverter::new(&context);
        let point = DataPoint::new(vec![1.0], vec![0]);
        let instance = rows.convert_point(&point, Some(TargetValue::Code(0))).unwrap();
        assert_eq!(
            instance.values,
            vec![
                Value::label("red"),
                Value::numeric(1.0),
                Value::Missing,
                Value::label("yes"),
            ]
        );
    }

    #[test]
    fn bare_point_leaves_target_missing() {
        let context = context();
        let rows = RowConverter::new(&context);
        let instance = rows
            .convert_point(&DataPoint::new(vec![1.0], vec![1]), None)
            .unwrap();
        assert_eq!(instance.values[3], Value::Missing);
    }

    #[test]
    fn target_without_target_slot_is_rejected() {
        let schema = Schema::new("plain", vec![Attribute::numeric("price")], None).unwrap();
        let context = ConversionContext::from_schema(&schema).unwrap();
        let err = RowConverter::new(&context)
            .convert_point(&DataPoint::new(vec![1.0], vec![]), Some(TargetValue::Real(2.0)))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnexpectedTarget {
                found: "real target"
            }
        );
        assert_eq!(err.to_string(), "context has no target, got a real target");
    }

    #[test]
    fn wrong_width_is_rejected() {
        let context = context();
        let rows = RowConverter::new(&context);
        let err = rows
            .convert_instance(&Instance::new(vec![Value::Missing; 2]))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::RecordShape {
                field: "values",
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn label_in_numeric_slot_is_rejected() {
        let context = context();
        let rows = RowConverter::new(&context);
        let instance = Instance::new(vec![
            Value::Missing,
            Value::label("cheap"),
            Value::Missing,
            Value::Missing,
        ]);
        assert!(matches!(
            rows.convert_instance(&instance),
            Err(ConvertError::UnexpectedValue {
                expected: "numeric",
                found: "label",
                ..
            })
        ));
    }

    #[test]
    fn target_of_wrong_kind_is_rejected() {
        let context = context();
        let rows = RowConverter::new(&context);
        let point = DataPoint::new(vec![1.0], vec![0]);
        assert!(matches!(
            rows.convert_point(&point, Some(TargetValue::Real(1.0))),
            Err(ConvertError::UnexpectedValue { .. })
        ));
    }
}
