//! Class attribute selection.

use std::fmt;
use std::str::FromStr;

use tbridge_model::Attribute;

use crate::error::{IoError, Result};

/// Which attribute of a loaded file is the class (target).
///
/// Parsed from `none`, `first`, `last`, a 1-based position, or an attribute
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassIndex {
    #[default]
    None,
    First,
    Last,
    /// 0-based position.
    Position(usize),
    Name(String),
}

impl ClassIndex {
    /// Resolve against the attributes of a file.
    ///
    /// `First` and `Last` resolve to no class on a file without attributes.
    pub fn resolve(&self, attributes: &[Attribute]) -> Result<Option<usize>> {
        match self {
            Self::None => Ok(None),
            Self::First => Ok((!attributes.is_empty()).then_some(0)),
            Self::Last => Ok(attributes.len().checked_sub(1)),
            Self::Position(index) if *index < attributes.len() => Ok(Some(*index)),
            Self::Position(index) => Err(IoError::ClassSelection {
                selection: (index + 1).to_string(),
                reason: format!("file has {} attribute(s)", attributes.len()),
            }),
            Self::Name(name) => attributes
                .iter()
                .position(|attribute| attribute.name == *name)
                .map(Some)
                .ok_or_else(|| IoError::ClassSelection {
                    selection: name.clone(),
                    reason: "no attribute with that name".to_string(),
                }),
        }
    }
}

impl FromStr for ClassIndex {
    type Err = IoError;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "none" => return Ok(Self::None),
            "first" => return Ok(Self::First),
            "last" => return Ok(Self::Last),
            _ => {}
        }
        if let Ok(position) = trimmed.parse::<usize>() {
            return position
                .checked_sub(1)
                .map(Self::Position)
                .ok_or_else(|| IoError::ClassSelection {
                    selection: trimmed.to_string(),
                    reason: "positions start at 1".to_string(),
                });
        }
        if trimmed.is_empty() {
            return Err(IoError::ClassSelection {
                selection: value.to_string(),
                reason: "empty selection".to_string(),
            });
        }
        Ok(Self::Name(trimmed.to_string()))
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::First => f.write_str("first"),
            Self::Last => f.write_str("last"),
            Self::Position(index) => write!(f, "{}", index + 1),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::numeric("a"),
            Attribute::numeric("b"),
            Attribute::categorical("class", ["x"]),
        ]
    }

    #[test]
    fn parses_keywords_positions_and_names() {
        assert_eq!("LAST".parse::<ClassIndex>().unwrap(), ClassIndex::Last);
        assert_eq!("2".parse::<ClassIndex>().unwrap(), ClassIndex::Position(1));
        assert_eq!(
            "class".parse::<ClassIndex>().unwrap(),
            ClassIndex::Name("class".to_string())
        );
        assert!("0".parse::<ClassIndex>().is_err());
        assert!("  ".parse::<ClassIndex>().is_err());
    }

    #[test]
    fn resolves_against_attributes() {
        let attributes = attributes();
        assert_eq!(ClassIndex::None.resolve(&attributes).unwrap(), None);
        assert_eq!(ClassIndex::First.resolve(&attributes).unwrap(), Some(0));
        assert_eq!(ClassIndex::Last.resolve(&attributes).unwrap(), Some(2));
        assert_eq!(
            ClassIndex::Name("b".to_string()).resolve(&attributes).unwrap(),
            Some(1)
        );
        assert!(ClassIndex::Position(3).resolve(&attributes).is_err());
        assert_eq!(ClassIndex::Last.resolve(&[]).unwrap(), None);
    }
}
