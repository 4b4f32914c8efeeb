//! Configuration for document acquisition

use crate::error::XmlPathError;
use serde::{Deserialize, Serialize};

/// Markup dialect used to read the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityMode {
    /// Well-formed XML; malformed input is rejected
    #[default]
    Xml,
    /// Tag soup such as real-world HTML; malformed input is repaired
    Html,
}

impl std::fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompatibilityMode::Xml => write!(f, "XML"),
            CompatibilityMode::Html => write!(f, "HTML"),
        }
    }
}

impl std::str::FromStr for CompatibilityMode {
    type Err = XmlPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(CompatibilityMode::Xml),
            "html" => Ok(CompatibilityMode::Html),
            _ => Err(XmlPathError::InvalidConfiguration {
                message: format!("Invalid compatibility mode: {s}"),
            }),
        }
    }
}

/// Document acquisition settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlPathConfig {
    /// Markup dialect
    pub mode: CompatibilityMode,
    /// Drop whitespace-only text runs
    pub trim_whitespace: bool,
    /// Maximum element nesting depth accepted by the front ends
    pub max_depth: usize,
}

impl Default for XmlPathConfig {
    fn default() -> Self {
        Self {
            mode: CompatibilityMode::Xml,
            trim_whitespace: true,
            max_depth: 512,
        }
    }
}

impl XmlPathConfig {
    /// Default settings for the given mode
    pub fn for_mode(mode: CompatibilityMode) -> Self {
        Self::default().with_mode(mode)
    }

    pub fn with_mode(mut self, mode: CompatibilityMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("xml", CompatibilityMode::Xml)]
    #[case("HTML", CompatibilityMode::Html)]
    #[case("Html", CompatibilityMode::Html)]
    fn test_mode_from_str(#[case] input: &str, #[case] expected: CompatibilityMode) {
        assert_eq!(input.parse::<CompatibilityMode>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_mode() {
        assert!("xhtml".parse::<CompatibilityMode>().is_err());
    }

    #[test]
    fn test_settings_from_json_fill_defaults() {
        let config: XmlPathConfig = serde_json::from_str(r#"{"mode": "html"}"#).unwrap();
        assert_eq!(config, XmlPathConfig::for_mode(CompatibilityMode::Html));

        let config: XmlPathConfig =
            serde_json::from_str(r#"{"trim_whitespace": false, "max_depth": 16}"#).unwrap();
        assert_eq!(config.mode, CompatibilityMode::Xml);
        assert_eq!(config.max_depth, 16);
        assert!(serde_json::from_str::<XmlPathConfig>(r#"{"mode": "sgml"}"#).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = XmlPathConfig::for_mode(CompatibilityMode::Html)
            .with_trim_whitespace(false)
            .with_max_depth(8);
        assert_eq!(config.mode, CompatibilityMode::Html);
        assert!(!config.trim_whitespace);
        assert_eq!(config.max_depth, 8);
        assert_eq!(XmlPathConfig::default().mode, CompatibilityMode::Xml);
    }
}
