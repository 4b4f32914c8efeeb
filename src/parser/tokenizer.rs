//! Byte-scanning tokenizer for path expressions
//!
//! ASCII punctuation is classified straight from the byte; identifiers fall
//! back to Unicode XID classes so element names in any script work.

use super::error::{ParseError, ParseResult};
use super::lexer::{is_identifier_continue, is_identifier_start};
use super::span::Spanned;
use std::borrow::Cow;
use std::fmt;

/// Path expression token
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'input> {
    /// Integer literal (e.g., 0, 42)
    Integer(i64),
    /// Decimal literal as string slice, parsed on demand (e.g., 2.5)
    Decimal(&'input str),
    /// String literal with escapes resolved (e.g., 'groceries')
    String(Cow<'input, str>),
    /// Identifier (element, attribute or function name)
    Identifier(&'input str),

    /// Dot (.) between steps
    Dot,
    /// Left square bracket [
    LeftBracket,
    /// Right square bracket ]
    RightBracket,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left curly brace {
    LeftBrace,
    /// Right curly brace }
    RightBrace,
    /// Attribute marker (@)
    At,
    /// Wildcard (*)
    Star,
    /// Recursive descent (**)
    DoubleStar,
    /// Document root ($)
    Dollar,
    /// Colon (:) between key and value in collectEntries
    Colon,
    /// Closure parameter arrow (->)
    Arrow,
    /// Minus sign (-) before a number
    Minus,

    /// Equality operator (==)
    Equal,
    /// Inequality operator (!=)
    NotEqual,
    /// Regular expression match operator (==~)
    Matches,
    /// Less than operator (<)
    LessThan,
    /// Less than or equal operator (<=)
    LessThanOrEqual,
    /// Greater than operator (>)
    GreaterThan,
    /// Greater than or equal operator (>=)
    GreaterThanOrEqual,
    /// Logical AND operator (&&)
    And,
    /// Logical OR operator (||)
    Or,
    /// Logical NOT operator (!)
    Not,
}

impl<'input> Token<'input> {
    /// Get identifier text if this is an identifier token
    pub fn as_identifier(&self) -> Option<&'input str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Check if token is an identifier
    pub fn is_identifier(&self) -> bool {
        matches!(self, Token::Identifier(_))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{i}"),
            Token::Decimal(d) => f.write_str(d),
            Token::String(s) => write!(f, "'{s}'"),
            Token::Identifier(name) => f.write_str(name),
            Token::Dot => f.write_str("."),
            Token::LeftBracket => f.write_str("["),
            Token::RightBracket => f.write_str("]"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::LeftBrace => f.write_str("{"),
            Token::RightBrace => f.write_str("}"),
            Token::At => f.write_str("@"),
            Token::Star => f.write_str("*"),
            Token::DoubleStar => f.write_str("**"),
            Token::Dollar => f.write_str("$"),
            Token::Colon => f.write_str(":"),
            Token::Arrow => f.write_str("->"),
            Token::Minus => f.write_str("-"),
            Token::Equal => f.write_str("=="),
            Token::NotEqual => f.write_str("!="),
            Token::Matches => f.write_str("==~"),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::And => f.write_str("&&"),
            Token::Or => f.write_str("||"),
            Token::Not => f.write_str("!"),
        }
    }
}

/// Tokenizer over a path expression
#[derive(Clone)]
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
}

impl<'input> Tokenizer<'input> {
    /// Create a new tokenizer
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek_byte(0) {
            self.pos += 1;
        }
    }

    /// Consume `len` bytes and return `token`
    #[inline(always)]
    fn advance(&mut self, len: usize, token: Token<'input>) -> Token<'input> {
        self.pos += len;
        token
    }

    fn parse_number(&mut self) -> ParseResult<Token<'input>> {
        let start = self.pos;
        while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        let is_decimal =
            self.peek_byte(0) == Some(b'.') && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit());
        if is_decimal {
            self.pos += 1;
            while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
            return Ok(Token::Decimal(&self.input[start..self.pos]));
        }

        let text = &self.input[start..self.pos];
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| ParseError::InvalidLiteral {
                literal_type: "integer",
                value: text.to_string(),
                position: start,
            })
    }

    fn parse_identifier(&mut self) -> ParseResult<Token<'input>> {
        let start = self.pos;
        let mut chars = self.input[start..].char_indices();
        match chars.next() {
            Some((_, c)) if is_identifier_start(c) => {}
            Some((_, c)) => {
                return Err(ParseError::UnexpectedToken {
                    token: Cow::Owned(c.to_string()),
                    position: start,
                });
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: Cow::Borrowed("identifier"),
                });
            }
        }

        let mut end = self.input.len();
        for (offset, c) in chars {
            // `item->` is a parameter followed by an arrow
            let arrow = c == '-' && self.input[start + offset..].starts_with("->");
            if arrow || !is_identifier_continue(c) {
                end = start + offset;
                break;
            }
        }
        self.pos = end;
        Ok(Token::Identifier(&self.input[start..end]))
    }

    fn parse_string_literal(&mut self, quote: u8) -> ParseResult<Token<'input>> {
        let open = self.pos;
        self.pos += 1;
        let start = self.pos;
        let mut owned: Option<String> = None;
        let mut run_start = start;

        while let Some(byte) = self.peek_byte(0) {
            match byte {
                b if b == quote => {
                    let tail = &self.input[run_start..self.pos];
                    self.pos += 1;
                    return Ok(Token::String(match owned {
                        Some(mut text) => {
                            text.push_str(tail);
                            Cow::Owned(text)
                        }
                        None => Cow::Borrowed(tail),
                    }));
                }
                b'\\' => {
                    let text = owned.get_or_insert_with(String::new);
                    text.push_str(&self.input[run_start..self.pos]);
                    let escape_pos = self.pos;
                    let Some(escaped) = self.input[self.pos + 1..].chars().next() else {
                        return Err(ParseError::UnclosedString { position: open });
                    };
                    let resolved = match escaped {
                        '\\' => '\\',
                        '\'' => '\'',
                        '"' => '"',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => {
                            return Err(ParseError::InvalidEscape {
                                sequence: format!("\\{other}"),
                                position: escape_pos,
                            });
                        }
                    };
                    text.push(resolved);
                    self.pos += 1 + escaped.len_utf8();
                    run_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }

        Err(ParseError::UnclosedString { position: open })
    }

    fn operator_error(&self, text: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            token: Cow::Borrowed(text),
            position: self.pos,
        }
    }

    /// Read the next token with its span
    pub fn next_token(&mut self) -> ParseResult<Option<Spanned<Token<'input>>>> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(byte) = self.peek_byte(0) else {
            return Ok(None);
        };

        let token = match byte {
            b'.' => self.advance(1, Token::Dot),
            b'[' => self.advance(1, Token::LeftBracket),
            b']' => self.advance(1, Token::RightBracket),
            b'(' => self.advance(1, Token::LeftParen),
            b')' => self.advance(1, Token::RightParen),
            b'{' => self.advance(1, Token::LeftBrace),
            b'}' => self.advance(1, Token::RightBrace),
            b'@' => self.advance(1, Token::At),
            b'$' => self.advance(1, Token::Dollar),
            b':' => self.advance(1, Token::Colon),
            b'*' => match self.peek_byte(1) {
                Some(b'*') => self.advance(2, Token::DoubleStar),
                _ => self.advance(1, Token::Star),
            },
            b'-' => match self.peek_byte(1) {
                Some(b'>') => self.advance(2, Token::Arrow),
                _ => self.advance(1, Token::Minus),
            },
            b'=' => match (self.peek_byte(1), self.peek_byte(2)) {
                (Some(b'='), Some(b'~')) => self.advance(3, Token::Matches),
                (Some(b'='), _) => self.advance(2, Token::Equal),
                _ => return Err(self.operator_error("=")),
            },
            b'!' => match self.peek_byte(1) {
                Some(b'=') => self.advance(2, Token::NotEqual),
                _ => self.advance(1, Token::Not),
            },
            b'<' => match self.peek_byte(1) {
                Some(b'=') => self.advance(2, Token::LessThanOrEqual),
                _ => self.advance(1, Token::LessThan),
            },
            b'>' => match self.peek_byte(1) {
                Some(b'=') => self.advance(2, Token::GreaterThanOrEqual),
                _ => self.advance(1, Token::GreaterThan),
            },
            b'&' => match self.peek_byte(1) {
                Some(b'&') => self.advance(2, Token::And),
                _ => return Err(self.operator_error("&")),
            },
            b'|' => match self.peek_byte(1) {
                Some(b'|') => self.advance(2, Token::Or),
                _ => return Err(self.operator_error("|")),
            },
            b'\'' | b'"' => self.parse_string_literal(byte)?,
            b'0'..=b'9' => self.parse_number()?,
            _ => self.parse_identifier()?,
        };

        Ok(Some(Spanned::new(token, start, self.pos)))
    }

    /// Tokenize the whole input
    pub fn tokenize_all(&mut self) -> ParseResult<Vec<Spanned<Token<'input>>>> {
        let mut tokens = Vec::with_capacity(16);
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenize a path expression
pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned<Token<'_>>>> {
    Tokenizer::new(input).tokenize_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_tokenizer_basic() {
        let mut tokenizer = Tokenizer::new("shopping.category");

        let token1 = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(token1.value.as_identifier(), Some("shopping"));
        assert_eq!((token1.start, token1.end), (0, 8));

        let token2 = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(token2.value, Token::Dot);

        let token3 = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(token3.value.as_identifier(), Some("category"));

        assert!(tokenizer.next_token().unwrap().is_none());
    }

    #[test]
    fn test_path_punctuation() {
        assert_eq!(
            values("**.item[0].@type"),
            vec![
                Token::DoubleStar,
                Token::Dot,
                Token::Identifier("item"),
                Token::LeftBracket,
                Token::Integer(0),
                Token::RightBracket,
                Token::Dot,
                Token::At,
                Token::Identifier("type"),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            values("== != ==~ < <= > >= && || ! -> - :"),
            vec![
                Token::Equal,
                Token::NotEqual,
                Token::Matches,
                Token::LessThan,
                Token::LessThanOrEqual,
                Token::GreaterThan,
                Token::GreaterThanOrEqual,
                Token::And,
                Token::Or,
                Token::Not,
                Token::Arrow,
                Token::Minus,
                Token::Colon,
            ]
        );
    }

    #[test]
    fn test_single_equals_is_rejected() {
        let err = tokenize("a = 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 2, .. }));
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(values("'groceries'"), vec![Token::String(Cow::Borrowed("groceries"))]);
        assert_eq!(values(r#""a\"b""#), vec![Token::String(Cow::Owned("a\"b".into()))]);
        assert_eq!(values(r"'it\'s'"), vec![Token::String(Cow::Owned("it's".into()))]);
        assert!(matches!(
            tokenize("'open"),
            Err(ParseError::UnclosedString { position: 0 })
        ));
        assert!(matches!(
            tokenize(r"'\q'"),
            Err(ParseError::InvalidEscape { position: 1, .. })
        ));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(values("42 2.5"), vec![Token::Integer(42), Token::Decimal("2.5")]);
        // a dot not followed by a digit separates steps
        assert_eq!(
            values("1.a"),
            vec![Token::Integer(1), Token::Dot, Token::Identifier("a")]
        );
        assert!(matches!(
            tokenize("99999999999999999999"),
            Err(ParseError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn test_identifiers_with_hyphens_and_unicode() {
        assert_eq!(
            values("first-name.größe"),
            vec![
                Token::Identifier("first-name"),
                Token::Dot,
                Token::Identifier("größe"),
            ]
        );
        assert_eq!(
            values("item->item"),
            vec![Token::Identifier("item"), Token::Arrow, Token::Identifier("item")]
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            tokenize("a.#b"),
            Err(ParseError::UnexpectedToken { position: 2, .. })
        ));
    }
}
