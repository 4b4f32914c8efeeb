// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for document acquisition and queries
//!
//! Every public operation reports one of four failure kinds: the document
//! could not be read ([`XmlPathError::Acquisition`]), a path did not parse
//! ([`XmlPathError::Parse`]), or a parsed path could not be evaluated or
//! converted ([`XmlPathError::Query`]).

use crate::config::CompatibilityMode;
use crate::evaluator::EvaluationError;
use crate::model::CoercionError;
use crate::parser::ParseError;
use thiserror::Error;

/// Result type alias for xmlpath operations
pub type Result<T> = std::result::Result<T, XmlPathError>;

/// Reasons a document could not be turned into a tree
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// Reading the source failed
    #[error("failed to read {source_name}")]
    Io {
        /// File name, URI or "stream"
        source_name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The strict front end rejected the markup
    #[error("malformed {mode} document: {message}")]
    Malformed {
        /// Front end that rejected the input
        mode: CompatibilityMode,
        /// Parser message, including the location
        message: String,
    },

    /// Input bytes are not valid UTF-8
    #[error("document is not valid UTF-8")]
    Encoding(#[source] std::str::Utf8Error),

    /// The document contains no element
    #[error("document has no root element")]
    NoRootElement,

    /// Elements are nested deeper than allowed
    #[error("document nesting exceeds the maximum depth of {max_depth}")]
    TooDeep {
        /// Configured limit
        max_depth: usize,
    },

    /// The URI could not be parsed
    #[error("invalid URI '{uri}'")]
    InvalidUri {
        /// Offending URI
        uri: String,
        /// Parse error from the URL parser
        #[source]
        source: url::ParseError,
    },

    /// The URI scheme is not readable locally
    #[error("unsupported URI scheme '{scheme}'")]
    UnsupportedUri {
        /// Scheme of the URI
        scheme: String,
    },
}

/// Failures of a parsed path against a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The path was semantically inapplicable to the document
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// The result did not fit the requested type
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum XmlPathError {
    /// The document could not be read or parsed
    #[error("failed to parse the XML document: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// The path expression is malformed
    #[error("invalid path '{path}': {source}")]
    Parse {
        /// Path text as given
        path: String,
        /// Parser error
        #[source]
        source: ParseError,
    },

    /// The path failed to evaluate or its result failed to convert
    #[error("failed to get path '{path}': {source}")]
    Query {
        /// Effective path, including the root path prefix
        path: String,
        /// Underlying failure
        #[source]
        source: QueryError,
    },

    /// Rendering the document failed
    #[error("failed to serialize document: {message}")]
    Serialization {
        /// Writer message
        message: String,
    },

    /// A configuration value could not be understood
    #[error("{message}")]
    InvalidConfiguration {
        /// Human-readable message
        message: String,
    },
}

impl XmlPathError {
    /// Create a parse failure for `path`
    pub fn parse(path: impl Into<String>, source: ParseError) -> Self {
        XmlPathError::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create a query failure for `path`
    pub fn query(path: impl Into<String>, source: impl Into<QueryError>) -> Self {
        XmlPathError::Query {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, XmlPathError::Acquisition(_))
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, XmlPathError::Parse { .. })
    }

    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            XmlPathError::Query {
                source: QueryError::Evaluation(_),
                ..
            }
        )
    }

    pub fn is_coercion_failure(&self) -> bool {
        matches!(
            self,
            XmlPathError::Query {
                source: QueryError::Coercion(_),
                ..
            }
        )
    }
}
