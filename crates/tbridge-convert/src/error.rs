//! Error types for dataset conversion.

use tbridge_model::ModelError;
use thiserror::Error;

/// Errors that can occur while converting records or datasets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    // === Structural Errors ===
    /// A conversion was attempted before `initialize`.
    #[error("converter used before initialize")]
    NotInitialized,

    /// The dataset's shape disagrees with the context it is converted against.
    #[error("schema mismatch: context expects {expected}, dataset has {found}")]
    SchemaMismatch { expected: String, found: String },

    /// A record's width disagrees with the context.
    #[error("record {field} length mismatch: expected {expected}, got {actual}")]
    RecordShape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    // === Value Errors ===
    /// A label outside the codec's domain.
    #[error("unknown label '{label}' for attribute '{attribute}'")]
    UnknownLabel { attribute: String, label: String },

    /// A code outside `[0, label_count)`.
    #[error("invalid code {code} for attribute '{attribute}' with {label_count} label(s)")]
    InvalidCode {
        attribute: String,
        code: i32,
        label_count: usize,
    },

    /// A value of the wrong kind, e.g. a label in a numeric slot.
    #[error("attribute '{attribute}' expects a {expected} value, got {found}")]
    UnexpectedValue {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A target value supplied to a context without a target.
    #[error("context has no target, got a {found}")]
    UnexpectedTarget { found: &'static str },

    // === Model Errors ===
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
