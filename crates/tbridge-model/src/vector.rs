//! Vector-oriented records and datasets.
//!
//! Each record is split into a numeric vector and a categorical code vector.
//! The target column lives on the dataset, not on the record, so a bare
//! [`DataPoint`] never knows its own label.
//!
//! Missing values are encoded out of domain: `NaN` for numeric and regression
//! target values, [`MISSING_CODE`] for categorical and class codes.

use serde::{Deserialize, Serialize};

use crate::attribute::validate_labels;
use crate::error::{ModelError, Result, check_weight};

/// Categorical code denoting a missing value.
pub const MISSING_CODE: i32 = -1;

/// Returns true when `code` is the missing sentinel.
pub fn is_missing_code(code: i32) -> bool {
    code == MISSING_CODE
}

/// Name and label list of one categorical variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoricalInfo")]
pub struct CategoricalInfo {
    name: String,
    labels: Vec<String>,
}

#[derive(Deserialize)]
struct RawCategoricalInfo {
    name: String,
    labels: Vec<String>,
}

impl TryFrom<RawCategoricalInfo> for CategoricalInfo {
    type Error = ModelError;

    fn try_from(raw: RawCategoricalInfo) -> Result<Self> {
        CategoricalInfo::new(raw.name, raw.labels)
    }
}

impl CategoricalInfo {
    /// Create a categorical variable; labels must be non-empty and unique.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        validate_labels(&name, &labels)?;
        Ok(Self { name, labels })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

/// Target column of a vector-oriented dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetDescriptor {
    Regression { name: String },
    Classification { info: CategoricalInfo },
}

impl TargetDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Regression { name } => name,
            Self::Classification { info } => info.name(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Regression { .. } => "regression",
            Self::Classification { .. } => "classification",
        }
    }

    /// The missing target value for this descriptor.
    pub fn missing_value(&self) -> TargetValue {
        match self {
            Self::Regression { .. } => TargetValue::Real(f64::NAN),
            Self::Classification { .. } => TargetValue::Code(MISSING_CODE),
        }
    }

    fn accepts(&self, value: TargetValue) -> bool {
        matches!(
            (self, value),
            (Self::Regression { .. }, TargetValue::Real(_))
                | (Self::Classification { .. }, TargetValue::Code(_))
        )
    }
}

/// Target value of one record: a real for regression, a code for
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetValue {
    Real(f64),
    Code(i32),
}

impl TargetValue {
    pub fn is_missing(self) -> bool {
        match self {
            Self::Real(value) => value.is_nan(),
            Self::Code(code) => is_missing_code(code),
        }
    }
}

/// Column layout of a vector-oriented dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorLayout {
    numeric_names: Vec<String>,
    categories: Vec<CategoricalInfo>,
    target: Option<TargetDescriptor>,
}

impl VectorLayout {
    pub fn new(
        numeric_names: Vec<String>,
        categories: Vec<CategoricalInfo>,
        target: Option<TargetDescriptor>,
    ) -> Self {
        Self {
            numeric_names,
            categories,
            target,
        }
    }

    /// Layout whose numeric variables are named `numeric-1`, `numeric-2`, ...
    pub fn unnamed(
        numeric_count: usize,
        categories: Vec<CategoricalInfo>,
        target: Option<TargetDescriptor>,
    ) -> Self {
        let numeric_names = (1..=numeric_count)
            .map(|index| format!("numeric-{index}"))
            .collect();
        Self::new(numeric_names, categories, target)
    }

    pub fn numeric_names(&self) -> &[String] {
        &self.numeric_names
    }

    pub fn categories(&self) -> &[CategoricalInfo] {
        &self.categories
    }

    pub fn target(&self) -> Option<&TargetDescriptor> {
        self.target.as_ref()
    }

    pub fn numeric_count(&self) -> usize {
        self.numeric_names.len()
    }

    pub fn categorical_count(&self) -> usize {
        self.categories.len()
    }

    /// Returns true when `other` has the same numeric and categorical counts
    /// and the same kind of target.
    pub fn is_compatible_with(&self, other: &VectorLayout) -> bool {
        let same_target = match (&self.target, &other.target) {
            (None, None) => true,
            (Some(left), Some(right)) => left.kind_name() == right.kind_name(),
            _ => false,
        };
        same_target
            && self.numeric_count() == other.numeric_count()
            && self.categorical_count() == other.categorical_count()
    }
}

/// A vector-oriented record. The target is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub numeric: Vec<f64>,
    pub categorical: Vec<i32>,
    pub weight: f64,
}

impl DataPoint {
    /// Create a data point with weight `1.0`.
    pub fn new(numeric: Vec<f64>, categorical: Vec<i32>) -> Self {
        Self {
            numeric,
            categorical,
            weight: 1.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A vector-oriented dataset: layout, data points, and the target column.
///
/// `targets` is empty when the layout has no target and otherwise holds one
/// value per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorDataset {
    layout: VectorLayout,
    points: Vec<DataPoint>,
    targets: Vec<TargetValue>,
}

impl VectorDataset {
    pub fn new(layout: VectorLayout) -> Self {
        Self::with_capacity(layout, 0)
    }

    pub fn with_capacity(layout: VectorLayout, capacity: usize) -> Self {
        let target_capacity = if layout.target.is_some() { capacity } else { 0 };
        Self {
            layout,
            points: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(target_capacity),
        }
    }

    /// Append a data point and its target value.
    ///
    /// `None` stores the missing target when the layout has a target.
    pub fn push(&mut self, point: DataPoint, target: Option<TargetValue>) -> Result<()> {
        check_len("numeric", self.layout.numeric_count(), point.numeric.len())?;
        check_len(
            "categorical",
            self.layout.categorical_count(),
            point.categorical.len(),
        )?;
        check_weight(point.weight)?;
        let target = match (&self.layout.target, target) {
            (None, None) => None,
            (None, Some(value)) => {
                return Err(ModelError::TargetKind {
                    expected: "no",
                    found: format!("{value:?}"),
                });
            }
            (Some(descriptor), None) => Some(descriptor.missing_value()),
            (Some(descriptor), Some(value)) => {
                if !descriptor.accepts(value) {
                    return Err(ModelError::TargetKind {
                        expected: descriptor.kind_name(),
                        found: format!("{value:?}"),
                    });
                }
                Some(value)
            }
        };
        self.points.push(point);
        if let Some(value) = target {
            self.targets.push(value);
        }
        Ok(())
    }

    pub fn layout(&self) -> &VectorLayout {
        &self.layout
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    /// Target column; empty when the layout has no target.
    pub fn targets(&self) -> &[TargetValue] {
        &self.targets
    }

    /// Target value of the record at `index`.
    pub fn target_value(&self, index: usize) -> Option<TargetValue> {
        self.targets.get(index).copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ModelError::RowLength {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> VectorLayout {
        VectorLayout::unnamed(
            1,
            vec![CategoricalInfo::new("b", ["x", "y"]).unwrap()],
            Some(TargetDescriptor::Classification {
                info: CategoricalInfo::new("c", ["yes", "no"]).unwrap(),
            }),
        )
    }

    #[test]
    fn unnamed_layout_generates_names() {
        assert_eq!(layout().numeric_names(), ["numeric-1".to_string()]);
    }

    #[test]
    fn push_fills_missing_target() {
        let mut dataset = VectorDataset::new(layout());
        dataset
            .push(DataPoint::new(vec![1.0], vec![0]), None)
            .unwrap();
        assert_eq!(dataset.target_value(0), Some(TargetValue::Code(MISSING_CODE)));
        assert!(dataset.targets()[0].is_missing());
    }

    #[test]
    fn push_rejects_wrong_target_kind() {
        let mut dataset = VectorDataset::new(layout());
        let err = dataset
            .push(
                DataPoint::new(vec![1.0], vec![0]),
                Some(TargetValue::Real(1.0)),
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::TargetKind { .. }));
        assert!(dataset.is_empty());
    }

    #[test]
    fn push_rejects_wrong_width() {
        let mut dataset = VectorDataset::new(layout());
        let err = dataset
            .push(DataPoint::new(vec![], vec![0]), None)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::RowLength {
                field: "numeric",
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn push_rejects_invalid_weights() {
        let mut dataset = VectorDataset::new(layout());
        for weight in [0.0, -1.5, f64::INFINITY] {
            let err = dataset
                .push(DataPoint::new(vec![1.0], vec![0]).with_weight(weight), None)
                .unwrap_err();
            assert_eq!(err, ModelError::InvalidWeight { weight });
        }
        assert!(dataset.is_empty());
    }

    #[test]
    fn compatibility_compares_counts_and_target_kind() {
        let other = VectorLayout::new(
            vec!["a".to_string()],
            vec![CategoricalInfo::new("q", ["1", "2", "3"]).unwrap()],
            Some(TargetDescriptor::Regression {
                name: "price".to_string(),
            }),
        );
        assert!(!layout().is_compatible_with(&other));
        assert!(layout().is_compatible_with(&layout()));
    }
}
