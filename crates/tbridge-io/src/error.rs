//! Error types for dataset reading and writing.

use std::path::PathBuf;

use tbridge_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading or writing datasets.
#[derive(Debug, Error)]
pub enum IoError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output.
    #[error("failed to write {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Malformed input at a line.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Valid input using a feature this reader does not handle.
    #[error("line {line}: {feature} are not supported")]
    Unsupported { line: usize, feature: &'static str },

    /// Invalid class attribute selection.
    #[error("invalid class selection '{selection}': {reason}")]
    ClassSelection { selection: String, reason: String },

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Model Errors ===
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IoError {
    pub(crate) fn read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;
