//! Strict XML front end backed by roxmltree

use super::{MarkupParser, normalize_text};
use crate::config::{CompatibilityMode, XmlPathConfig};
use crate::error::AcquisitionError;
use crate::model::{ElementBuilder, Node};

/// Rejects anything that is not well-formed XML
#[derive(Debug, Clone)]
pub struct StrictXmlParser {
    trim_whitespace: bool,
    max_depth: usize,
}

impl StrictXmlParser {
    pub fn new(config: &XmlPathConfig) -> Self {
        Self {
            trim_whitespace: config.trim_whitespace,
            max_depth: config.max_depth,
        }
    }

    fn build(&self, element: roxmltree::Node<'_, '_>, depth: usize) -> Result<Node, AcquisitionError> {
        if depth > self.max_depth {
            return Err(AcquisitionError::TooDeep {
                max_depth: self.max_depth,
            });
        }

        let mut builder = ElementBuilder::new(element.tag_name().name());
        for attr in element.attributes() {
            builder.push_attribute(attr.name(), attr.value());
        }

        for child in element.children() {
            if child.is_element() {
                builder.push_child(self.build(child, depth + 1)?);
            } else if child.is_text() {
                if let Some(text) = child
                    .text()
                    .and_then(|t| normalize_text(t, self.trim_whitespace))
                {
                    builder.push_text(text);
                }
            }
        }

        Ok(builder.build())
    }
}

impl Default for StrictXmlParser {
    fn default() -> Self {
        Self::new(&XmlPathConfig::default())
    }
}

impl MarkupParser for StrictXmlParser {
    fn mode(&self) -> CompatibilityMode {
        CompatibilityMode::Xml
    }

    fn parse(&self, text: &str) -> Result<Node, AcquisitionError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(text, options).map_err(|e| {
            AcquisitionError::Malformed {
                mode: CompatibilityMode::Xml,
                message: e.to_string(),
            }
        })?;
        self.build(document.root_element(), 1)
    }
}
