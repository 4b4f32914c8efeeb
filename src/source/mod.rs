//! Markup front ends
//!
//! A front end turns document text into the immutable element tree. XML
//! mode uses a strict parser that rejects malformed input; HTML mode uses a
//! tag-soup reader that repairs it. Both apply the same whitespace policy so
//! a well-formed document gives the same tree in either mode.

pub mod lenient;
pub mod strict;

pub use lenient::LenientHtmlParser;
pub use strict::StrictXmlParser;

use crate::config::{CompatibilityMode, XmlPathConfig};
use crate::error::AcquisitionError;
use crate::model::Node;
use log::debug;
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

/// Builds a document tree from markup text
pub trait MarkupParser: Send + Sync {
    /// Dialect handled by this front end
    fn mode(&self) -> CompatibilityMode;

    /// Parse the text and return the root element
    fn parse(&self, text: &str) -> Result<Node, AcquisitionError>;
}

/// Front end for the configured mode
pub fn parser_for(config: &XmlPathConfig) -> Box<dyn MarkupParser> {
    match config.mode {
        CompatibilityMode::Xml => Box::new(StrictXmlParser::new(config)),
        CompatibilityMode::Html => Box::new(LenientHtmlParser::new(config)),
    }
}

/// Parse document text with the configured front end
pub fn parse_document(text: &str, config: &XmlPathConfig) -> Result<Node, AcquisitionError> {
    let root = parser_for(config).parse(text)?;
    debug!(
        "parsed {} document: root <{}>, {} elements",
        config.mode,
        root.name(),
        root.subtree_size()
    );
    Ok(root)
}

/// Decode raw bytes; XML requires UTF-8 while HTML replaces invalid sequences
pub fn decode<'a>(bytes: &'a [u8], mode: CompatibilityMode) -> Result<Cow<'a, str>, AcquisitionError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match mode {
        CompatibilityMode::Xml => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(AcquisitionError::Encoding),
        CompatibilityMode::Html => Ok(String::from_utf8_lossy(bytes)),
    }
}

/// Read a whole stream and decode it
pub fn read_source<R: Read>(
    mut reader: R,
    source_name: &str,
    mode: CompatibilityMode,
) -> Result<String, AcquisitionError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| AcquisitionError::Io {
            source_name: source_name.to_string(),
            source,
        })?;
    decode(&bytes, mode).map(Cow::into_owned)
}

/// Read and decode a file
pub fn read_file(path: &Path, mode: CompatibilityMode) -> Result<String, AcquisitionError> {
    let bytes = std::fs::read(path).map_err(|source| AcquisitionError::Io {
        source_name: path.display().to_string(),
        source,
    })?;
    decode(&bytes, mode).map(Cow::into_owned)
}

/// Read and decode a `file:` URI
pub fn read_uri(uri: &str, mode: CompatibilityMode) -> Result<String, AcquisitionError> {
    let url = url::Url::parse(uri).map_err(|source| AcquisitionError::InvalidUri {
        uri: uri.to_string(),
        source,
    })?;
    if url.scheme() != "file" {
        return Err(AcquisitionError::UnsupportedUri {
            scheme: url.scheme().to_string(),
        });
    }
    let path = url
        .to_file_path()
        .map_err(|()| AcquisitionError::UnsupportedUri {
            scheme: format!("{} (host '{}')", url.scheme(), url.host_str().unwrap_or_default()),
        })?;
    read_file(&path, mode)
}

/// Apply the whitespace policy to a run of character data
///
/// With `trim` set only whitespace-only runs are dropped; any other run is
/// kept verbatim so words either side of a child element stay apart.
pub(crate) fn normalize_text(raw: &str, trim: bool) -> Option<&str> {
    if raw.is_empty() || (trim && raw.trim().is_empty()) {
        return None;
    }
    Some(raw)
}
