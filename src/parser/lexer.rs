//! Lexical analysis utilities

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::Token;
use std::borrow::Cow;

/// Check if a character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_start(c) || c == '_'
}

/// Check if a character can continue an identifier; hyphens are allowed
/// because they are common in element names
pub fn is_identifier_continue(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_continue(c) || c == '-'
}

/// Closing partner of an opening delimiter token
fn closing_of(open: &Token<'_>) -> Option<(char, Token<'static>)> {
    match open {
        Token::LeftBracket => Some(('[', Token::RightBracket)),
        Token::LeftParen => Some(('(', Token::RightParen)),
        Token::LeftBrace => Some(('{', Token::RightBrace)),
        _ => None,
    }
}

/// Token stream with lookahead capability
#[derive(Debug)]
pub struct TokenStream<'input> {
    tokens: Vec<Spanned<Token<'input>>>,
    position: usize,
    input_len: usize,
}

impl<'input> TokenStream<'input> {
    /// Create a new token stream over the tokens of an input of `input_len` bytes
    pub fn new(tokens: Vec<Spanned<Token<'input>>>, input_len: usize) -> Self {
        Self {
            tokens,
            position: 0,
            input_len,
        }
    }

    /// Peek at the current token without consuming
    pub fn peek(&self) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position)
    }

    /// Peek at a token n positions ahead
    pub fn peek_ahead(&self, n: usize) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<Spanned<Token<'input>>> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Check if we're at the end of the stream
    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Byte offset of the current token, or the input length at the end
    pub fn offset(&self) -> usize {
        self.peek().map_or(self.input_len, |t| t.start)
    }

    /// Consume a token if it matches the predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Spanned<Token<'input>>>
    where
        F: FnOnce(&Token<'input>) -> bool,
    {
        if predicate(&self.peek()?.value) {
            return self.next();
        }
        None
    }

    /// Check whether the current token equals `expected`
    pub fn at(&self, expected: &Token<'_>) -> bool {
        self.peek().is_some_and(|t| &t.value == expected)
    }

    /// Consume the closing partner of the delimiter `open`
    ///
    /// Running out of input reports the opening delimiter as unbalanced.
    pub fn expect_closing(&mut self, open: &Spanned<Token<'input>>) -> ParseResult<()> {
        let Some((delimiter, closing)) = closing_of(&open.value) else {
            return Err(unexpected(&open.value, open.start));
        };
        match self.peek() {
            Some(token) if token.value == closing => {
                self.position += 1;
                Ok(())
            }
            Some(token) => Err(unexpected(&token.value, token.start)),
            None => Err(ParseError::UnbalancedDelimiter {
                delimiter,
                position: open.start,
            }),
        }
    }
}

/// Error for a token that cannot appear at `position`
pub fn unexpected(token: &Token<'_>, position: usize) -> ParseError {
    match token {
        Token::RightBracket => ParseError::UnbalancedDelimiter {
            delimiter: ']',
            position,
        },
        Token::RightParen => ParseError::UnbalancedDelimiter {
            delimiter: ')',
            position,
        },
        Token::RightBrace => ParseError::UnbalancedDelimiter {
            delimiter: '}',
            position,
        },
        other => ParseError::UnexpectedToken {
            token: Cow::Owned(other.to_string()),
            position,
        },
    }
}
