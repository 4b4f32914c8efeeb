//! Path and segment parsing
//!
//! ```text
//! path    := [ '$' [ '.' ] ] [ segment ( '.' segment )* ]
//! segment := primary index*
//! primary := NAME | QUOTED | '*' | '**' | '@' NAME
//!          | NAME '(' ')' | CLOSURE_FN '{' closure '}' | NAME '{' condition '}'
//! ```
//!
//! Closure bodies are parsed by the Pratt parser in [`super::pratt`].

use super::error::{ParseError, ParseResult};
use super::lexer::{TokenStream, unexpected};
use super::span::Spanned;
use super::tokenizer::{Token, Tokenizer};
use crate::ast::{ClosureShape, Expression, FunctionCall, PathExpression, Step, closure_shape};
use std::borrow::Cow;

/// Parameter name used when a closure does not declare one
pub(super) const IMPLICIT_PARAMETER: &str = "it";

/// Recursive-descent parser for paths
pub(super) struct PathParser<'input> {
    pub(super) tokens: TokenStream<'input>,
    /// Closure parameter names, innermost last
    pub(super) parameters: Vec<&'input str>,
}

impl<'input> PathParser<'input> {
    pub(super) fn new(input: &'input str) -> ParseResult<Self> {
        let tokens = Tokenizer::new(input).tokenize_all()?;
        Ok(Self {
            tokens: TokenStream::new(tokens, input.len()),
            parameters: Vec::new(),
        })
    }

    /// Parse a complete path; trailing tokens are an error
    pub(super) fn parse_path(mut self) -> ParseResult<PathExpression> {
        let mut steps = Vec::new();

        if self.tokens.consume_if(|t| matches!(t, Token::Dollar)).is_some() {
            if self.tokens.is_eof() {
                return Ok(PathExpression::root());
            }
            self.tokens.consume_if(|t| matches!(t, Token::Dot));
        }

        if !self.tokens.is_eof() {
            self.parse_segments(&mut steps)?;
        }

        if let Some(token) = self.tokens.peek() {
            return Err(unexpected(&token.value, token.start));
        }
        Ok(PathExpression::new(steps))
    }

    /// `segment ( '.' segment )*`
    pub(super) fn parse_segments(&mut self, steps: &mut Vec<Step>) -> ParseResult<()> {
        loop {
            self.parse_segment(steps)?;
            if self.tokens.consume_if(|t| matches!(t, Token::Dot)).is_none() {
                return Ok(());
            }
        }
    }

    fn parse_segment(&mut self, steps: &mut Vec<Step>) -> ParseResult<()> {
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::UnexpectedEof {
                expected: Cow::Borrowed("path segment"),
            });
        };

        match token.value {
            Token::Identifier(name) => self.parse_named_segment(name, token.start, steps)?,
            Token::String(name) => steps.push(Step::Child(name.into_owned())),
            Token::Star => steps.push(Step::Wildcard),
            Token::DoubleStar => steps.push(Step::RecursiveDescent),
            Token::At => {
                let name = self.expect_name("attribute name")?;
                steps.push(Step::Attribute(name));
            }
            other => return Err(unexpected(&other, token.start)),
        }

        while let Some(open) = self.tokens.consume_if(|t| matches!(t, Token::LeftBracket)) {
            let index = self.parse_index(&open)?;
            steps.push(Step::Index(index));
        }
        Ok(())
    }

    fn expect_name(&mut self, expected: &'static str) -> ParseResult<String> {
        match self.tokens.next() {
            Some(Spanned {
                value: Token::Identifier(name),
                ..
            }) => Ok(name.to_string()),
            Some(Spanned {
                value: Token::String(name),
                ..
            }) => Ok(name.into_owned()),
            Some(token) => Err(unexpected(&token.value, token.start)),
            None => Err(ParseError::UnexpectedEof {
                expected: Cow::Borrowed(expected),
            }),
        }
    }

    pub(super) fn parse_index(&mut self, open: &Spanned<Token<'input>>) -> ParseResult<usize> {
        let index = match self.tokens.next() {
            Some(Spanned {
                value: Token::Integer(n),
                start,
                ..
            }) => usize::try_from(n).map_err(|_| ParseError::InvalidIndex {
                value: n.to_string(),
                position: start,
            })?,
            Some(Spanned {
                value: Token::Minus,
                start,
                ..
            }) => return Err(ParseError::NegativeIndex { position: start }),
            Some(Spanned {
                value: Token::RightBracket,
                start,
                ..
            }) => {
                return Err(ParseError::InvalidIndex {
                    value: String::new(),
                    position: start,
                });
            }
            Some(token) => {
                return Err(ParseError::InvalidIndex {
                    value: token.value.to_string(),
                    position: token.start,
                });
            }
            None => {
                return Err(ParseError::UnbalancedDelimiter {
                    delimiter: '[',
                    position: open.start,
                });
            }
        };
        self.tokens.expect_closing(open)?;
        Ok(index)
    }

    fn parse_named_segment(
        &mut self,
        name: &'input str,
        position: usize,
        steps: &mut Vec<Step>,
    ) -> ParseResult<()> {
        if let Some(open) = self.tokens.consume_if(|t| matches!(t, Token::LeftParen)) {
            match self.tokens.peek() {
                Some(token) if token.value == Token::RightParen => {
                    self.tokens.next();
                }
                Some(_) => {
                    return Err(ParseError::FunctionArguments {
                        name: name.to_string(),
                        position,
                    });
                }
                None => {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '(',
                        position: open.start,
                    });
                }
            }
            steps.push(Step::Function(Box::new(FunctionCall::new(name))));
            return Ok(());
        }

        let Some(open) = self.tokens.consume_if(|t| matches!(t, Token::LeftBrace)) else {
            steps.push(Step::Child(name.to_string()));
            return Ok(());
        };

        let shape = closure_shape(name);
        let body = self.parse_closure(name, shape.unwrap_or(ClosureShape::Predicate), &open)?;
        match (shape, body) {
            (None, ClosureBody::Predicate(condition)) => {
                steps.push(Step::Child(name.to_string()));
                steps.push(Step::Predicate(Box::new(condition)));
            }
            (_, ClosureBody::Predicate(condition)) => {
                steps.push(Step::Function(Box::new(FunctionCall::with_args(name, [condition]))));
            }
            (_, ClosureBody::Entry(key, value)) => {
                steps.push(Step::Function(Box::new(FunctionCall::with_args(
                    name,
                    [key, value],
                ))));
            }
        }
        Ok(())
    }

    /// Parse a closure body after its opening brace
    fn parse_closure(
        &mut self,
        name: &str,
        shape: ClosureShape,
        open: &Spanned<Token<'input>>,
    ) -> ParseResult<ClosureBody> {
        let parameter = match (self.tokens.peek(), self.tokens.peek_ahead(1)) {
            (
                Some(Spanned {
                    value: Token::Identifier(param),
                    ..
                }),
                Some(Spanned {
                    value: Token::Arrow,
                    ..
                }),
            ) => {
                let param = *param;
                self.tokens.next();
                self.tokens.next();
                param
            }
            _ => IMPLICIT_PARAMETER,
        };

        self.parameters.push(parameter);
        let body = self.parse_closure_body(name, shape, open);
        self.parameters.pop();
        let body = body?;

        self.tokens.expect_closing(open)?;
        Ok(body)
    }

    fn parse_closure_body(
        &mut self,
        name: &str,
        shape: ClosureShape,
        open: &Spanned<Token<'input>>,
    ) -> ParseResult<ClosureBody> {
        let body_start = self.tokens.offset();
        if self.tokens.is_eof() || self.tokens.at(&Token::RightBrace) {
            return Err(ParseError::InvalidClosure {
                name: name.to_string(),
                message: Cow::Borrowed("empty closure body"),
                position: open.start,
            });
        }

        match shape {
            ClosureShape::Predicate => {
                let condition = self.parse_expression()?;
                if !condition.is_boolean() {
                    return Err(ParseError::NonBooleanPredicate {
                        position: body_start,
                    });
                }
                Ok(ClosureBody::Predicate(condition))
            }
            ClosureShape::Entry => {
                let key = self.parse_expression()?;
                if self.tokens.consume_if(|t| matches!(t, Token::Colon)).is_none() {
                    return Err(ParseError::InvalidClosure {
                        name: name.to_string(),
                        message: Cow::Borrowed("expected `key : value`"),
                        position: open.start,
                    });
                }
                let value = self.parse_expression()?;
                Ok(ClosureBody::Entry(key, value))
            }
        }
    }
}

enum ClosureBody {
    Predicate(Expression),
    Entry(Expression, Expression),
}
