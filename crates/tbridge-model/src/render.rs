//! Deterministic text rendering of both dataset representations.
//!
//! Attribute datasets render as ARFF. Vector datasets render in an ARFF-like
//! header followed by one line per record. Missing values always print as `?`.

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::attribute::{AttributeKind, Schema};
use crate::instance::{AttributeDataset, Instance, Value};
use crate::vector::{
    CategoricalInfo, DataPoint, TargetDescriptor, TargetValue, VectorDataset, is_missing_code,
};

const MISSING: &str = "?";

/// Quote a name or label when ARFF would not read it back verbatim.
pub fn quote(text: &str) -> Cow<'_, str> {
    let needs_quotes = text.is_empty()
        || text.chars().any(|ch| {
            ch.is_whitespace() || matches!(ch, ',' | '{' | '}' | '\'' | '"' | '%' | '?' | '\\')
        });
    if !needs_quotes {
        return Cow::Borrowed(text);
    }
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\'' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

fn write_real(f: &mut impl Write, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str(MISSING)
    } else {
        write!(f, "{value}")
    }
}

fn write_code(f: &mut impl Write, code: i32) -> fmt::Result {
    if is_missing_code(code) {
        f.write_str(MISSING)
    } else {
        write!(f, "{code}")
    }
}

fn write_label_set(f: &mut impl Write, labels: &[String]) -> fmt::Result {
    f.write_char('{')?;
    for (index, label) in labels.iter().enumerate() {
        if index > 0 {
            f.write_char(',')?;
        }
        f.write_str(&quote(label))?;
    }
    f.write_char('}')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str(MISSING),
            Value::Numeric(value) => write_real(f, *value),
            Value::Label(text) | Value::Text(text) => f.write_str(&quote(text)),
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_char(',')?;
            }
            write!(f, "{value}")?;
        }
        if self.weight != 1.0 {
            write!(f, ",{{{}}}", self.weight)?;
        }
        Ok(())
    }
}

fn write_schema_header(f: &mut impl Write, schema: &Schema) -> fmt::Result {
    writeln!(f, "@relation {}", quote(schema.name()))?;
    writeln!(f)?;
    for attribute in schema.attributes() {
        write!(f, "@attribute {} ", quote(&attribute.name))?;
        match &attribute.kind {
            AttributeKind::Numeric => f.write_str("numeric")?,
            AttributeKind::Categorical { labels } => write_label_set(f, labels)?,
            AttributeKind::Unsupported { kind } => f.write_str(kind)?,
        }
        writeln!(f)?;
    }
    writeln!(f)?;
    writeln!(f, "@data")
}

impl fmt::Display for AttributeDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_schema_header(f, self.schema())?;
        for instance in self.instances() {
            writeln!(f, "{instance}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (index, value) in self.numeric.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write_real(f, *value)?;
        }
        f.write_str("] [")?;
        for (index, code) in self.categorical.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write_code(f, *code)?;
        }
        f.write_char(']')
    }
}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetValue::Real(value) => write_real(f, *value),
            TargetValue::Code(code) => write_code(f, *code),
        }
    }
}

fn write_categorical(f: &mut impl Write, keyword: &str, info: &CategoricalInfo) -> fmt::Result {
    write!(f, "@{keyword} {} ", quote(info.name()))?;
    write_label_set(f, info.labels())?;
    writeln!(f)
}

impl fmt::Display for VectorDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout();
        for name in layout.numeric_names() {
            writeln!(f, "@numeric {}", quote(name))?;
        }
        for info in layout.categories() {
            write_categorical(f, "categorical", info)?;
        }
        match layout.target() {
            Some(TargetDescriptor::Regression { name }) => {
                writeln!(f, "@target {} numeric", quote(name))?;
            }
            Some(TargetDescriptor::Classification { info }) => {
                write_categorical(f, "target", info)?;
            }
            None => {}
        }
        writeln!(f, "@data")?;
        for (index, point) in self.points().iter().enumerate() {
            write!(f, "{point}")?;
            if let Some(target) = self.target_value(index) {
                write!(f, " target={target}")?;
            }
            writeln!(f, " weight={}", point.weight)?;
        }
        Ok(())
    }
}
