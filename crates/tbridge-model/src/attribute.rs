//! Attribute-oriented schema types.
//!
//! A [`Schema`] is the column metadata of an attribute-oriented dataset: an
//! ordered list of named attributes, each numeric, categorical (with a declared
//! label list), or of a kind the vector representation cannot carry. At most
//! one attribute may be designated as the target.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Kind of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Real-valued attribute.
    Numeric,
    /// Nominal attribute with labels in declared order.
    Categorical { labels: Vec<String> },
    /// Any other kind (`string`, `date`, `relational`, ...).
    Unsupported { kind: String },
}

impl AttributeKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical { .. })
    }

    /// Declared labels of a categorical attribute.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            Self::Categorical { labels } => Some(labels),
            _ => None,
        }
    }

    /// Short kind name as it appears in reports.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical { .. } => "categorical",
            Self::Unsupported { kind } => kind,
        }
    }

    /// Returns true when both kinds are the same variant.
    ///
    /// Label lists are not compared: a categorical attribute whose labels
    /// changed is still the same column shape.
    pub fn same_shape(&self, other: &AttributeKind) -> bool {
        match (self, other) {
            (Self::Numeric, Self::Numeric) => true,
            (Self::Categorical { .. }, Self::Categorical { .. }) => true,
            (Self::Unsupported { kind: left }, Self::Unsupported { kind: right }) => {
                left.eq_ignore_ascii_case(right)
            }
            _ => false,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    /// Create a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Create a categorical attribute with labels in declared order.
    pub fn categorical<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Categorical {
                labels: labels.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Create an attribute of a kind the vector representation cannot hold.
    pub fn unsupported(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Unsupported { kind: kind.into() },
        }
    }

    /// Position of a label in the declared label list.
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.kind
            .labels()
            .and_then(|labels| labels.iter().position(|candidate| candidate == label))
    }
}

/// Ordered attribute metadata of an attribute-oriented dataset.
///
/// Construction validates the schema: categorical attributes carry at least
/// one label and no duplicates, and the target index is in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct Schema {
    name: String,
    attributes: Vec<Attribute>,
    target: Option<usize>,
}

#[derive(Deserialize)]
struct RawSchema {
    name: String,
    attributes: Vec<Attribute>,
    #[serde(default)]
    target: Option<usize>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = ModelError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        Schema::new(raw.name, raw.attributes, raw.target)
    }
}

impl Schema {
    /// Create a validated schema.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        target: Option<usize>,
    ) -> Result<Self> {
        for attribute in &attributes {
            if let Some(labels) = attribute.kind.labels() {
                validate_labels(&attribute.name, labels)?;
            }
        }
        if let Some(index) = target
            && index >= attributes.len()
        {
            return Err(ModelError::TargetOutOfRange {
                index,
                count: attributes.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            attributes,
            target,
        })
    }

    /// Return a copy of this schema with a different target designation.
    pub fn with_target(&self, target: Option<usize>) -> Result<Self> {
        Self::new(self.name.clone(), self.attributes.clone(), target)
    }

    /// Relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Index of the target attribute, if one is designated.
    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    pub fn target_attribute(&self) -> Option<&Attribute> {
        self.target.and_then(|index| self.attributes.get(index))
    }

    /// Find an attribute by name (case-sensitive).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name == name)
    }

    /// Returns true when `other` has the same width, the same attribute kind
    /// at every index, and the same target designation.
    pub fn is_compatible_with(&self, other: &Schema) -> bool {
        self.attributes.len() == other.attributes.len()
            && self.target == other.target
            && self
                .attributes
                .iter()
                .zip(&other.attributes)
                .all(|(left, right)| left.kind.same_shape(&right.kind))
    }
}

pub(crate) fn validate_labels(attribute: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(ModelError::EmptyLabels {
            attribute: attribute.to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(ModelError::DuplicateLabel {
                attribute: attribute.to_string(),
                label: label.clone(),
            });
        }
    }
    Ok(())
}
