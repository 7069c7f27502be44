//! Error types for dataset model construction.

use thiserror::Error;

/// Errors raised while building schemas, layouts, and datasets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A categorical attribute was declared without labels.
    #[error("categorical attribute '{attribute}' declares no labels")]
    EmptyLabels { attribute: String },

    /// A categorical attribute declares the same label twice.
    #[error("categorical attribute '{attribute}' declares label '{label}' more than once")]
    DuplicateLabel { attribute: String, label: String },

    /// The target index does not point at an attribute.
    #[error("target index {index} is out of range for {count} attribute(s)")]
    TargetOutOfRange { index: usize, count: usize },

    /// A record does not have the width its schema requires.
    #[error("{field} length mismatch: expected {expected}, got {actual}")]
    RowLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A record weight is not a positive finite number.
    #[error("invalid weight {weight}: weights must be positive and finite")]
    InvalidWeight { weight: f64 },

    /// A target value does not match the dataset's target descriptor.
    #[error("target value {found} does not fit {expected} target")]
    TargetKind {
        expected: &'static str,
        found: String,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Reject weights that are not positive and finite.
pub fn check_weight(weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidWeight { weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::RowLength {
            field: "values",
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "values length mismatch: expected 3, got 2");
    }

    #[test]
    fn weights_must_be_positive_and_finite() {
        assert!(check_weight(0.5).is_ok());
        for weight in [0.0, -2.0, f64::INFINITY] {
            assert_eq!(check_weight(weight), Err(ModelError::InvalidWeight { weight }));
        }
        assert!(matches!(
            check_weight(f64::NAN),
            Err(ModelError::InvalidWeight { weight }) if weight.is_nan()
        ));
    }
}
