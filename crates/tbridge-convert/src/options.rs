//! Conversion options.

use serde::Serialize;

/// Relation name given to schemas synthesized from a vector layout.
pub const DEFAULT_RELATION_NAME: &str = "vector-dataset";

/// Name given to the target attribute under [`AttributeNaming::Generic`].
pub const GENERIC_TARGET_NAME: &str = "class";

/// How attributes are named when a schema is synthesized from a vector layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeNaming {
    /// Keep the variable names of the layout.
    #[default]
    Preserve,
    /// Use `numeric-N`, `categorical-N`, and `class`, numbered from 1.
    Generic,
}

impl AttributeNaming {
    pub(crate) fn numeric(self, index: usize, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Generic => format!("numeric-{}", index + 1),
        }
    }

    pub(crate) fn categorical(self, index: usize, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Generic => format!("categorical-{}", index + 1),
        }
    }

    pub(crate) fn target(self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Generic => GENERIC_TARGET_NAME.to_string(),
        }
    }
}

/// Options for vector → attribute conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOptions {
    /// Relation name of the synthesized schema.
    pub relation_name: String,
    pub naming: AttributeNaming,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            relation_name: DEFAULT_RELATION_NAME.to_string(),
            naming: AttributeNaming::default(),
        }
    }
}

impl ConversionOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relation name.
    #[must_use]
    pub fn with_relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = name.into();
        self
    }

    /// Set the attribute naming scheme.
    #[must_use]
    pub fn with_naming(mut self, naming: AttributeNaming) -> Self {
        self.naming = naming;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConversionOptions::new()
            .with_relation_name("iris")
            .with_naming(AttributeNaming::Generic);
        assert_eq!(options.relation_name, "iris");
        assert_eq!(options.naming, AttributeNaming::Generic);
    }

    #[test]
    fn test_generic_names() {
        let naming = AttributeNaming::Generic;
        assert_eq!(naming.numeric(0, "x"), "numeric-1");
        assert_eq!(naming.categorical(2, "x"), "categorical-3");
        assert_eq!(naming.target("x"), "class");
        assert_eq!(AttributeNaming::Preserve.numeric(0, "x"), "x");
    }
}
