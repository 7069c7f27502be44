//! ARFF reading.

use std::path::Path;

use tbridge_model::{
    Attribute, AttributeDataset, AttributeKind, Instance, Schema, Value, check_weight,
};
use tracing::{debug, info};

use super::token::{Token, next_word, split_list};
use crate::class::ClassIndex;
use crate::error::{IoError, Result};

/// Read an ARFF file.
pub fn read_arff(path: &Path, class: &ClassIndex) -> Result<AttributeDataset> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::read(path.to_path_buf(), e))?;
    let dataset = parse_arff(&text, class)?;
    info!(
        path = %path.display(),
        relation = dataset.schema().name(),
        attributes = dataset.schema().len(),
        instances = dataset.len(),
        "loaded ARFF file"
    );
    Ok(dataset)
}

/// Parse ARFF text.
///
/// Handles `%` comment lines, quoted names and labels, `numeric`, `real`,
/// `integer`, nominal, `string` and `date` attributes, `?` for missing
/// values, and `{w}` instance weights. String and date attributes load as
/// unsupported kinds with text values. Sparse instances and relational
/// attributes are rejected.
pub fn parse_arff(text: &str, class: &ClassIndex) -> Result<AttributeDataset> {
    let mut relation: Option<String> = None;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut dataset: Option<AttributeDataset> = None;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if let Some(dataset) = dataset.as_mut() {
            let instance = parse_instance(line, line_no, dataset.schema())?;
            dataset.push(instance)?;
            continue;
        }

        if !line.starts_with('@') {
            return Err(IoError::parse(line_no, "expected a declaration before @data"));
        }
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {
                let (name, _) = next_word(rest).map_err(|message| IoError::parse(line_no, message))?;
                relation = Some(name.text);
            }
            "@attribute" => attributes.push(parse_attribute(rest, line_no)?),
            "@data" => {
                let name = relation
                    .take()
                    .ok_or_else(|| IoError::parse(line_no, "@data before @relation"))?;
                let target = class.resolve(&attributes)?;
                let schema = Schema::new(name, std::mem::take(&mut attributes), target)?;
                debug!(
                    relation = schema.name(),
                    attributes = schema.len(),
                    "parsed ARFF header"
                );
                dataset = Some(AttributeDataset::new(schema));
            }
            "@end" => {
                return Err(IoError::Unsupported {
                    line: line_no,
                    feature: "relational attributes",
                });
            }
            other => {
                return Err(IoError::parse(line_no, format!("unknown declaration '{other}'")));
            }
        }
    }

    dataset.ok_or_else(|| IoError::parse(last_line, "missing @data section"))
}

fn parse_attribute(rest: &str, line_no: usize) -> Result<Attribute> {
    let (name, spec) = next_word(rest).map_err(|message| IoError::parse(line_no, message))?;
    let spec = spec.trim();

    if let Some(inner) = spec.strip_prefix('{') {
        let inner = inner
            .strip_suffix('}')
            .ok_or_else(|| IoError::parse(line_no, "unterminated label set"))?;
        let labels = split_list(inner).map_err(|message| IoError::parse(line_no, message))?;
        return Ok(Attribute::categorical(
            name.text,
            labels.into_iter().map(|token| token.text),
        ));
    }

    let kind = spec.split_whitespace().next().unwrap_or_default();
    match kind.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Attribute::numeric(name.text)),
        "string" => Ok(Attribute::unsupported(name.text, "string")),
        "date" => Ok(Attribute::unsupported(name.text, "date")),
        "relational" => Err(IoError::Unsupported {
            line: line_no,
            feature: "relational attributes",
        }),
        "" => Err(IoError::parse(
            line_no,
            format!("attribute '{}' has no type", name.text),
        )),
        other => Err(IoError::parse(
            line_no,
            format!("unknown type '{other}' for attribute '{}'", name.text),
        )),
    }
}

fn parse_instance(line: &str, line_no: usize, schema: &Schema) -> Result<Instance> {
    if line.starts_with('{') {
        return Err(IoError::Unsupported {
            line: line_no,
            feature: "sparse instances",
        });
    }
    let mut tokens = split_list(line).map_err(|message| IoError::parse(line_no, message))?;

    let mut weight = 1.0;
    if tokens.len() == schema.len() + 1
        && let Some(last) = tokens.last()
        && !last.quoted
        && let Some(inner) = last.text.strip_prefix('{').and_then(|t| t.strip_suffix('}'))
    {
        weight = inner
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|&weight| check_weight(weight).is_ok())
            .ok_or_else(|| IoError::parse(line_no, format!("invalid weight '{}'", last.text)))?;
        tokens.pop();
    }

    if tokens.len() != schema.len() {
        return Err(IoError::parse(
            line_no,
            format!("expected {} values, found {}", schema.len(), tokens.len()),
        ));
    }

    let values = tokens
        .into_iter()
        .zip(schema.attributes())
        .map(|(token, attribute)| parse_value(token, attribute, line_no))
        .collect::<Result<Vec<_>>>()?;
    Ok(Instance::new(values).with_weight(weight))
}

fn parse_value(token: Token, attribute: &Attribute, line_no: usize) -> Result<Value> {
    if token.is_missing() {
        return Ok(Value::Missing);
    }
    match &attribute.kind {
        AttributeKind::Numeric => token.text.parse::<f64>().map(Value::numeric).map_err(|_| {
            IoError::parse(
                line_no,
                format!(
                    "invalid number '{}' for attribute '{}'",
                    token.text, attribute.name
                ),
            )
        }),
        AttributeKind::Categorical { labels } => {
            if labels.contains(&token.text) {
                Ok(Value::Label(token.text))
            } else {
                Err(IoError::parse(
                    line_no,
                    format!(
                        "unknown label '{}' for attribute '{}'",
                        token.text, attribute.name
                    ),
                ))
            }
        }
        AttributeKind::Unsupported { .. } => Ok(Value::Text(token.text)),
    }
}
