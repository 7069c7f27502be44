//! Rendering and verification of conversion results.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tbridge_convert::{ConversionContext, DatasetAssembler};
use tbridge_model::{AttributeDataset, Value, VectorDataset};
use tracing::{info, warn};

/// Tolerance for numeric values compared after a round trip.
pub const ROUNDTRIP_TOLERANCE: f64 = 1e-9;

/// Text encodings of a vector dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFormat {
    /// Header lines followed by one line per record.
    Text,
    Csv,
    Json,
}

/// Render a vector dataset. Output is deterministic for a given dataset.
pub fn render_vectors(dataset: &VectorDataset, format: VectorFormat) -> Result<String> {
    match format {
        VectorFormat::Text => Ok(dataset.to_string()),
        VectorFormat::Csv => {
            let mut buffer = Vec::new();
            tbridge_io::write_vector_csv(dataset, &mut buffer).context("render csv")?;
            String::from_utf8(buffer).context("csv output is not UTF-8")
        }
        VectorFormat::Json => {
            let mut json = serde_json::to_string_pretty(dataset).context("render json")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write rendered output to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("write output: {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

/// Outcome of converting a vector dataset back against its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub records: usize,
    /// Indices of records that did not survive unchanged.
    pub mismatched: Vec<usize>,
}

impl RoundTrip {
    pub fn is_exact(&self) -> bool {
        self.mismatched.is_empty()
    }
}

/// Convert `vectors` back with `context` and compare every converted
/// attribute and weight with `original`. Skipped attributes are not
/// compared.
pub fn verify_roundtrip(
    original: &AttributeDataset,
    context: &ConversionContext,
    vectors: &VectorDataset,
) -> Result<RoundTrip> {
    let back = DatasetAssembler::new(context)
        .assemble_attribute(vectors)
        .context("convert back")?;
    let partition = context.partition();
    let mut compared: Vec<usize> = partition
        .numeric_indices
        .iter()
        .chain(&partition.categorical_indices)
        .copied()
        .collect();
    compared.extend(partition.target.as_ref().map(|target| target.index));

    let mut mismatched = Vec::new();
    for (row, (before, after)) in original.instances().iter().zip(back.instances()).enumerate() {
        let same = before.weight == after.weight
            && compared
                .iter()
                .all(|&index| values_match(&before.values[index], &after.values[index]));
        if !same {
            warn!(row, "record changed in round trip");
            mismatched.push(row);
        }
    }
    if original.len() != back.len() {
        mismatched.extend(back.len().min(original.len())..back.len().max(original.len()));
    }

    Ok(RoundTrip {
        records: original.len(),
        mismatched,
    })
}

fn values_match(before: &Value, after: &Value) -> bool {
    if before.is_missing() || after.is_missing() {
        return before.is_missing() && after.is_missing();
    }
    match (before.as_numeric(), after.as_numeric()) {
        (Some(left), Some(right)) => {
            left == right || (left - right).abs() <= ROUNDTRIP_TOLERANCE
        }
        _ => before == after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_nan_match() {
        assert!(values_match(&Value::Missing, &Value::Numeric(f64::NAN)));
        assert!(!values_match(&Value::Missing, &Value::numeric(0.0)));
        assert!(values_match(&Value::numeric(1.0), &Value::numeric(1.0 + 1e-12)));
        assert!(values_match(
            &Value::numeric(f64::INFINITY),
            &Value::numeric(f64::INFINITY)
        ));
        assert!(values_match(
            &Value::numeric(f64::NEG_INFINITY),
            &Value::numeric(f64::NEG_INFINITY)
        ));
        assert!(!values_match(
            &Value::numeric(f64::INFINITY),
            &Value::numeric(f64::NEG_INFINITY)
        ));
        assert!(!values_match(&Value::label("a"), &Value::label("b")));
    }
}
