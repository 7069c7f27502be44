//! Conversion context.
//!
//! A [`ConversionContext`] captures everything needed to convert records in
//! either direction: the attribute-side schema records are indexed against,
//! the canonical schema, the vector layout, the partition, and one code map
//! per categorical feature plus the target.

use tbridge_model::{Attribute, Schema, TargetDescriptor, VectorLayout};
use tracing::{debug, warn};

use crate::classify::{Partition, TargetRole, classify};
use crate::codec::CodeMap;
use crate::error::Result;
use crate::options::ConversionOptions;

/// How the target column is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetCodec {
    Regression { name: String },
    Classification(CodeMap),
}

impl TargetCodec {
    pub fn name(&self) -> &str {
        match self {
            Self::Regression { name } => name,
            Self::Classification(codec) => codec.attribute(),
        }
    }

    fn descriptor(&self) -> TargetDescriptor {
        match self {
            Self::Regression { name } => TargetDescriptor::Regression { name: name.clone() },
            Self::Classification(codec) => TargetDescriptor::Classification {
                info: codec.info().clone(),
            },
        }
    }
}

/// Immutable snapshot of a (schema, layout) pair, built once per
/// initialization and shared by every conversion that follows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionContext {
    source: Schema,
    canonical: Schema,
    layout: VectorLayout,
    partition: Partition,
    codecs: Vec<CodeMap>,
    target: Option<TargetCodec>,
}

impl ConversionContext {
    /// Build a context from an attribute-side schema.
    ///
    /// Unsupported attributes are skipped and logged. An unsupported target is
    /// skipped as well, leaving the layout without a target.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let partition = classify(schema);
        for skipped in &partition.skipped {
            warn!(
                attribute = %skipped.name,
                kind = %skipped.kind,
                reason = %skipped.reason,
                "skipping attribute"
            );
        }

        let attributes = schema.attributes();
        let numeric_names: Vec<String> = partition
            .numeric_indices
            .iter()
            .map(|&index| attributes[index].name.clone())
            .collect();
        let codecs = partition
            .categorical_indices
            .iter()
            .map(|&index| codec_for(&attributes[index]))
            .collect::<Result<Vec<_>>>()?;
        let target = match &partition.target {
            None => None,
            Some(target) => Some(match &target.role {
                TargetRole::Regression => TargetCodec::Regression {
                    name: target.name.clone(),
                },
                TargetRole::Classification(labels) => TargetCodec::Classification(
                    CodeMap::build(target.name.clone(), labels.iter().cloned())?,
                ),
            }),
        };

        let canonical = canonical_schema(schema.name(), &numeric_names, &codecs, target.as_ref())?;
        let layout = VectorLayout::new(
            numeric_names,
            codecs.iter().map(|codec| codec.info().clone()).collect(),
            target.as_ref().map(TargetCodec::descriptor),
        );
        debug!(
            relation = schema.name(),
            numeric = layout.numeric_count(),
            categorical = layout.categorical_count(),
            skipped = partition.skipped.len(),
            "built context from schema"
        );

        Ok(Self {
            source: schema.clone(),
            canonical,
            layout,
            partition,
            codecs,
            target,
        })
    }

    /// Build a context from a vector layout, synthesizing the canonical
    /// schema: numeric attributes, then categorical attributes, then the
    /// target.
    pub fn from_layout(layout: &VectorLayout, options: &ConversionOptions) -> Result<Self> {
        let naming = options.naming;
        let numeric_names: Vec<String> = layout
            .numeric_names()
            .iter()
            .enumerate()
            .map(|(index, name)| naming.numeric(index, name))
            .collect();
        let codecs = layout
            .categories()
            .iter()
            .enumerate()
            .map(|(index, info)| {
                CodeMap::build(
                    naming.categorical(index, info.name()),
                    info.labels().iter().cloned(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let target = match layout.target() {
            None => None,
            Some(TargetDescriptor::Regression { name }) => Some(TargetCodec::Regression {
                name: naming.target(name),
            }),
            Some(TargetDescriptor::Classification { info }) => Some(
                TargetCodec::Classification(CodeMap::build(
                    naming.target(info.name()),
                    info.labels().iter().cloned(),
                )?),
            ),
        };

        let canonical = canonical_schema(
            &options.relation_name,
            &numeric_names,
            &codecs,
            target.as_ref(),
        )?;
        let partition = classify(&canonical);
        debug!(
            relation = %options.relation_name,
            numeric = layout.numeric_count(),
            categorical = layout.categorical_count(),
            "built context from layout"
        );

        Ok(Self {
            source: canonical.clone(),
            canonical,
            layout: layout.clone(),
            partition,
            codecs,
            target,
        })
    }

    /// Schema that attribute-side records are indexed against.
    ///
    /// This is the original schema for contexts built with
    /// [`from_schema`](Self::from_schema) and the canonical schema otherwise.
    pub fn schema(&self) -> &Schema {
        &self.source
    }

    /// Schema with numeric attributes first, then categorical attributes,
    /// then the target. Skipped attributes are absent.
    pub fn canonical_schema(&self) -> &Schema {
        &self.canonical
    }

    pub fn layout(&self) -> &VectorLayout {
        &self.layout
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Code maps of the categorical features, in layout order.
    pub fn codecs(&self) -> &[CodeMap] {
        &self.codecs
    }

    pub fn target_codec(&self) -> Option<&TargetCodec> {
        self.target.as_ref()
    }

    /// One-line description of the attribute-side shape.
    pub fn describe_schema(schema: &Schema) -> String {
        let kinds: Vec<&str> = schema
            .attributes()
            .iter()
            .map(|attribute| attribute.kind.as_str())
            .collect();
        let target = schema
            .target_index()
            .map_or_else(|| "none".to_string(), |index| index.to_string());
        format!(
            "{} attribute(s) [{}], target {}",
            schema.len(),
            kinds.join(", "),
            target
        )
    }

    /// One-line description of the vector-side shape.
    pub fn describe_layout(layout: &VectorLayout) -> String {
        let target = layout
            .target()
            .map_or("no", TargetDescriptor::kind_name);
        format!(
            "{} numeric, {} categorical, {} target",
            layout.numeric_count(),
            layout.categorical_count(),
            target
        )
    }
}

fn codec_for(attribute: &Attribute) -> Result<CodeMap> {
    CodeMap::build(
        attribute.name.clone(),
        attribute.kind.labels().unwrap_or_default().iter().cloned(),
    )
}

fn canonical_schema(
    relation: &str,
    numeric_names: &[String],
    codecs: &[CodeMap],
    target: Option<&TargetCodec>,
) -> Result<Schema> {
    let mut attributes: Vec<Attribute> = numeric_names
        .iter()
        .map(|name| Attribute::numeric(name.clone()))
        .collect();
    attributes.extend(
        codecs
            .iter()
            .map(|codec| Attribute::categorical(codec.attribute(), codec.labels().iter().cloned())),
    );
    let target_index = target.map(|target| {
        attributes.push(match target {
            TargetCodec::Regression { name } => Attribute::numeric(name.clone()),
            TargetCodec::Classification(codec) => {
                Attribute::categorical(codec.attribute(), codec.labels().iter().cloned())
            }
        });
        attributes.len() - 1
    });
    Ok(Schema::new(relation, attributes, target_index)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AttributeNaming;
    use tbridge_model::CategoricalInfo;

    fn mixed_schema() -> Schema {
        Schema::new(
            "mixed",
            vec![
                Attribute::categorical("color", ["red", "green"]),
                Attribute::numeric("size"),
                Attribute::unsupported("note", "string"),
                Attribute::categorical("label", ["yes", "no"]),
                Attribute::numeric("weight"),
            ],
            Some(3),
        )
        .unwrap()
    }

    #[test]
    fn canonical_order_is_numeric_categorical_target() {
        let context = ConversionContext::from_schema(&mixed_schema()).unwrap();
        let names: Vec<&str> = context
            .canonical_schema()
            .attributes()
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect();
        assert_eq!(names, vec!["size", "weight", "color", "label"]);
        assert_eq!(context.canonical_schema().target_index(), Some(3));
        assert_eq!(context.canonical_schema().name(), "mixed");
    }

    #[test]
    fn layout_mirrors_partition() {
        let context = ConversionContext::from_schema(&mixed_schema()).unwrap();
        let layout = context.layout();
        assert_eq!(layout.numeric_names(), ["size", "weight"]);
        assert_eq!(layout.categorical_count(), 1);
        assert_eq!(layout.categories()[0].name(), "color");
        assert_eq!(
            layout.target().map(TargetDescriptor::kind_name),
            Some("classification")
        );
        assert_eq!(context.partition().skipped.len(), 1);
    }

    #[test]
    fn from_layout_uses_generic_names() {
        let layout = VectorLayout::new(
            vec!["a".to_string(), "b".to_string()],
            vec![CategoricalInfo::new("c", ["x", "y"]).unwrap()],
            Some(TargetDescriptor::Regression {
                name: "t".to_string(),
            }),
        );
        let options = ConversionOptions::new().with_naming(AttributeNaming::Generic);
        let context = ConversionContext::from_layout(&layout, &options).unwrap();
        let names: Vec<&str> = context
            .schema()
            .attributes()
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["numeric-1", "numeric-2", "categorical-1", "class"]
        );
        assert_eq!(context.schema().name(), "vector-dataset");
        assert_eq!(context.schema().target_index(), Some(3));
    }

    #[test]
    fn describe_shapes() {
        let context = ConversionContext::from_schema(&mixed_schema()).unwrap();
        assert_eq!(
            ConversionContext::describe_layout(context.layout()),
            "2 numeric, 1 categorical, classification target"
        );
        assert_eq!(
            ConversionContext::describe_schema(context.canonical_schema()),
            "4 attribute(s) [numeric, numeric, categorical, categorical], target 3"
        );
    }
}
