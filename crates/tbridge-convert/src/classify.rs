//! Attribute classification.
//!
//! Partitions a schema into numeric features, categorical features, skipped
//! attributes, and the optional target. The partition decides the canonical
//! column order: numeric features, then categorical features, then the target.

use std::fmt;

use serde::Serialize;
use tbridge_model::{AttributeKind, Schema};

/// Why an attribute was left out of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The attribute kind has no vector-oriented counterpart.
    UnsupportedKind,
    /// The designated target has a kind the vector side cannot hold; the
    /// dataset is converted as unsupervised.
    UnsupportedTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedKind => write!(f, "unsupported attribute kind"),
            Self::UnsupportedTarget => write!(f, "unsupported target kind"),
        }
    }
}

/// An attribute dropped from the conversion, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAttribute {
    /// Index in the source schema.
    pub index: usize,
    pub name: String,
    pub kind: AttributeKind,
    pub reason: SkipReason,
}

/// Role of the target attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    Regression,
    Classification(Vec<String>),
}

impl TargetRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regression => "regression",
            Self::Classification(_) => "classification",
        }
    }
}

/// The target attribute of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetAttribute {
    /// Index in the source schema.
    pub index: usize,
    pub name: String,
    pub role: TargetRole,
}

/// Result of classifying a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Source indices of numeric features, in schema order.
    pub numeric_indices: Vec<usize>,
    /// Source indices of categorical features, in schema order.
    pub categorical_indices: Vec<usize>,
    pub skipped: Vec<SkippedAttribute>,
    pub target: Option<TargetAttribute>,
}

impl Partition {
    pub fn target_role(&self) -> Option<&TargetRole> {
        self.target.as_ref().map(|target| &target.role)
    }

    /// Width of the canonical schema: features plus the target, if any.
    pub fn width(&self) -> usize {
        self.numeric_indices.len()
            + self.categorical_indices.len()
            + usize::from(self.target.is_some())
    }
}

/// Partition `schema` into numeric, categorical, skipped, and target groups.
///
/// Never fails: an empty schema yields an empty partition.
pub fn classify(schema: &Schema) -> Partition {
    let mut partition = Partition::default();
    let target_index = schema.target_index();

    for (index, attribute) in schema.attributes().iter().enumerate() {
        let is_target = target_index == Some(index);
        match &attribute.kind {
            AttributeKind::Numeric if is_target => {
                partition.target = Some(TargetAttribute {
                    index,
                    name: attribute.name.clone(),
                    role: TargetRole::Regression,
                });
            }
            AttributeKind::Categorical { labels } if is_target => {
                partition.target = Some(TargetAttribute {
                    index,
                    name: attribute.name.clone(),
                    role: TargetRole::Classification(labels.clone()),
                });
            }
            AttributeKind::Numeric => partition.numeric_indices.push(index),
            AttributeKind::Categorical { .. } => partition.categorical_indices.push(index),
            AttributeKind::Unsupported { .. } => {
                let reason = if is_target {
                    SkipReason::UnsupportedTarget
                } else {
                    SkipReason::UnsupportedKind
                };
                partition.skipped.push(SkippedAttribute {
                    index,
                    name: attribute.name.clone(),
                    kind: attribute.kind.clone(),
                    reason,
                });
            }
        }
    }

    partition
}
