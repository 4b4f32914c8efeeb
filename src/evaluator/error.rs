//! Error types for path evaluation

use crate::registry::function::FunctionError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors raised when a well-formed path cannot be applied to a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Index past the end of the current result
    #[error("Index {index} out of bounds for result of size {size}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of members in the indexed result
        size: usize,
    },

    /// Index applied to a value that has no members
    #[error("Cannot index into a {value_type} value")]
    InvalidIndexTarget {
        /// Type of the indexed value
        value_type: &'static str,
    },

    /// Function name not present in the registry
    #[error("Unknown function '{name}()'")]
    UnknownFunction {
        /// Function name
        name: String,
    },

    /// Function evaluation error
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// Relational comparison against text that is not a number
    #[error("Cannot compare non-numeric value '{value}' with a number")]
    NonNumeric {
        /// The offending text
        value: String,
    },

    /// Element navigation applied to a scalar
    #[error("Cannot navigate to '{step}' from a {value_type} value")]
    InvalidNavigation {
        /// The step as written
        step: String,
        /// Type of the current value
        value_type: &'static str,
    },

    /// `==~` with a pattern that is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern text
        pattern: String,
        /// Regex compiler message
        message: String,
    },
}
