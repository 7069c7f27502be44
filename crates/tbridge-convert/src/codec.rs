//! Label ↔ code mapping for categorical attributes.

use std::collections::BTreeMap;

use tbridge_model::CategoricalInfo;

use crate::error::{ConvertError, Result};

/// Bidirectional mapping between the labels of one categorical attribute and
/// dense codes `0..n`.
///
/// Codes follow the declared label order, never sorting or frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMap {
    info: CategoricalInfo,
    codes: BTreeMap<String, i32>,
}

impl CodeMap {
    /// Build a code map; labels must be non-empty and unique.
    pub fn build<I, S>(attribute: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let info = CategoricalInfo::new(attribute, labels)?;
        Ok(Self::from_info(&info))
    }

    /// Build a code map from an already validated categorical variable.
    pub fn from_info(info: &CategoricalInfo) -> Self {
        let codes = info
            .labels()
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as i32))
            .collect();
        Self {
            info: info.clone(),
            codes,
        }
    }

    /// Code of `label`.
    pub fn encode(&self, label: &str) -> Result<i32> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| ConvertError::UnknownLabel {
                attribute: self.info.name().to_string(),
                label: label.to_string(),
            })
    }

    /// Label of `code`.
    ///
    /// The missing sentinel is rejected like any other out-of-range code;
    /// callers check for it first.
    pub fn decode(&self, code: i32) -> Result<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.info.labels().get(index))
            .map(String::as_str)
            .ok_or_else(|| ConvertError::InvalidCode {
                attribute: self.info.name().to_string(),
                code,
                label_count: self.len(),
            })
    }

    pub fn attribute(&self) -> &str {
        self.info.name()
    }

    pub fn labels(&self) -> &[String] {
        self.info.labels()
    }

    /// The categorical variable this map was built from.
    pub fn info(&self) -> &CategoricalInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.info.label_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbridge_model::MISSING_CODE;

    #[test]
    fn codes_follow_declaration_order() {
        let map = CodeMap::build("color", ["red", "green", "blue"]).unwrap();
        assert_eq!(map.encode("red").unwrap(), 0);
        assert_eq!(map.encode("green").unwrap(), 1);
        assert_eq!(map.encode("blue").unwrap(), 2);
        assert_eq!(map.decode(1).unwrap(), "green");
    }

    #[test]
    fn encode_rejects_unknown_label() {
        let map = CodeMap::build("color", ["red"]).unwrap();
        assert_eq!(
            map.encode("purple").unwrap_err(),
            ConvertError::UnknownLabel {
                attribute: "color".to_string(),
                label: "purple".to_string()
            }
        );
    }

    #[test]
    fn decode_rejects_out_of_range_and_missing() {
        let map = CodeMap::build("color", ["red", "green"]).unwrap();
        assert!(matches!(
            map.decode(2),
            Err(ConvertError::InvalidCode { code: 2, .. })
        ));
        assert!(matches!(
            map.decode(MISSING_CODE),
            Err(ConvertError::InvalidCode { code: -1, .. })
        ));
    }

    #[test]
    fn build_rejects_duplicates() {
        assert!(matches!(
            CodeMap::build("c", ["a", "a"]),
            Err(ConvertError::Model(_))
        ));
    }
}
