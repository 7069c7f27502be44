//! CSV reading with attribute kind inference.

use std::io::Read;
use std::path::Path;

use ::csv::ReaderBuilder;
use tbridge_model::{Attribute, AttributeDataset, Instance, Schema, Value};
use tracing::info;

use crate::class::ClassIndex;
use crate::error::{IoError, Result};

fn is_missing(field: &str) -> bool {
    field.is_empty() || field == "?"
}

/// Read a CSV file with a header row. The relation is named after the file
/// stem.
pub fn read_csv(path: &Path, class: &ClassIndex) -> Result<AttributeDataset> {
    let file = std::fs::File::open(path).map_err(|e| IoError::read(path.to_path_buf(), e))?;
    let relation = path
        .file_stem()
        .map_or_else(|| "csv".to_string(), |stem| stem.to_string_lossy().into_owned());
    let dataset = parse_csv(file, &relation, class)?;
    info!(
        path = %path.display(),
        attributes = dataset.schema().len(),
        instances = dataset.len(),
        "loaded CSV file"
    );
    Ok(dataset)
}

/// Parse CSV with a header row.
///
/// A column whose present values all parse as numbers is numeric; any other
/// column is categorical with labels in order of first appearance. Empty
/// fields and `?` are missing.
pub fn parse_csv<R: Read>(input: R, relation: &str, class: &ClassIndex) -> Result<AttributeDataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(input);

    let names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim_matches('\u{feff}').to_string())
        .collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let attributes: Vec<Attribute> = names
        .iter()
        .enumerate()
        .map(|(column, name)| infer_attribute(name, rows.iter().map(|row| row[column].as_str())))
        .collect();
    let target = class.resolve(&attributes)?;
    let schema = Schema::new(relation, attributes, target)?;

    let mut dataset = AttributeDataset::with_capacity(schema, rows.len());
    for row in rows {
        let values = row
            .into_iter()
            .zip(dataset.schema().attributes())
            .map(|(field, attribute)| {
                if is_missing(&field) {
                    Value::Missing
                } else if attribute.kind.is_numeric() {
                    field.parse::<f64>().map_or(Value::Missing, Value::numeric)
                } else {
                    Value::Label(field)
                }
            })
            .collect();
        dataset.push(Instance::new(values))?;
    }
    Ok(dataset)
}

fn infer_attribute<'a>(name: &str, column: impl Iterator<Item = &'a str>) -> Attribute {
    let present: Vec<&str> = column.filter(|field| !is_missing(field)).collect();
    if present.iter().all(|field| field.parse::<f64>().is_ok()) {
        return Attribute::numeric(name);
    }
    let mut labels: Vec<&str> = Vec::new();
    for field in present {
        if !labels.contains(&field) {
            labels.push(field);
        }
    }
    Attribute::categorical(name, labels)
}
