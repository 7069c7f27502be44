//! ARFF reading and writing.

mod reader;
mod token;

use std::path::Path;

use tbridge_model::AttributeDataset;
use tracing::info;

use crate::error::{IoError, Result};

pub use reader::{parse_arff, read_arff};

/// Write a dataset as ARFF.
pub fn write_arff(path: &Path, dataset: &AttributeDataset) -> Result<()> {
    std::fs::write(path, dataset.to_string()).map_err(|source| IoError::Write {
        target: path.display().to_string(),
        source,
    })?;
    info!(
        path = %path.display(),
        instances = dataset.len(),
        "wrote ARFF file"
    );
    Ok(())
}
