//! Parse errors for path expressions

use std::borrow::Cow;
use thiserror::Error;

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while compiling a path
///
/// Positions are byte offsets into the path text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that cannot appear here
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Token text
        token: Cow<'static, str>,
        /// Position of the token
        position: usize,
    },

    /// The path ended early
    #[error("Unexpected end of path, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for
        expected: Cow<'static, str>,
    },

    /// A string literal without its closing quote
    #[error("Unclosed string literal starting at position {position}")]
    UnclosedString {
        /// Position of the opening quote
        position: usize,
    },

    /// An unsupported backslash escape
    #[error("Invalid escape sequence '{sequence}' at position {position}")]
    InvalidEscape {
        /// The escape as written
        sequence: String,
        /// Position of the backslash
        position: usize,
    },

    /// A bracket, parenthesis or brace without its partner
    #[error("Unbalanced '{delimiter}' at position {position}")]
    UnbalancedDelimiter {
        /// The unmatched delimiter
        delimiter: char,
        /// Position of the delimiter
        position: usize,
    },

    /// An index that is not a non-negative integer
    #[error("Invalid index '{value}' at position {position}")]
    InvalidIndex {
        /// Index text
        value: String,
        /// Position of the index
        position: usize,
    },

    /// Negative indexes are not supported
    #[error("Negative index at position {position} is not supported")]
    NegativeIndex {
        /// Position of the minus sign
        position: usize,
    },

    /// Arguments passed to a function that takes none
    #[error("Function '{name}' at position {position} takes no arguments")]
    FunctionArguments {
        /// Function name
        name: String,
        /// Position of the function name
        position: usize,
    },

    /// A closure body of the wrong shape
    #[error("Invalid closure for '{name}' at position {position}: {message}")]
    InvalidClosure {
        /// Function name
        name: String,
        /// What was wrong
        message: Cow<'static, str>,
        /// Position of the opening brace
        position: usize,
    },

    /// A condition that does not produce a boolean
    #[error("Condition at position {position} is not a boolean expression")]
    NonBooleanPredicate {
        /// Position of the condition
        position: usize,
    },

    /// A numeric literal that does not fit
    #[error("Invalid {literal_type} literal '{value}' at position {position}")]
    InvalidLiteral {
        /// Literal kind
        literal_type: &'static str,
        /// Literal text
        value: String,
        /// Position of the literal
        position: usize,
    },
}

impl ParseError {
    /// Byte offset of the error, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEof { .. } => None,
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnclosedString { position }
            | ParseError::InvalidEscape { position, .. }
            | ParseError::UnbalancedDelimiter { position, .. }
            | ParseError::InvalidIndex { position, .. }
            | ParseError::NegativeIndex { position }
            | ParseError::FunctionArguments { position, .. }
            | ParseError::InvalidClosure { position, .. }
            | ParseError::NonBooleanPredicate { position }
            | ParseError::InvalidLiteral { position, .. } => Some(*position),
        }
    }
}
