//! Pratt parser for closure body expressions
//!
//! Binding strength, loosest first: `||`, `&&`, `==` `!=` `==~`,
//! `<` `<=` `>` `>=`, then prefix `!`. All binary operators are left
//! associative.

use super::error::{ParseError, ParseResult};
use super::lexer::unexpected;
use super::path::PathParser;
use super::tokenizer::Token;
use crate::ast::{BinaryOperator, Expression, LiteralValue, PathExpression, Step};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;

/// Operator precedence levels (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Start of an expression
    Lowest = 0,
    /// Logical OR
    Or = 1,
    /// Logical AND
    And = 2,
    /// Equality and pattern match
    Equality = 3,
    /// Ordering comparisons
    Relational = 4,
}

/// Binary operator and precedence for an infix token
fn infix_operator(token: &Token<'_>) -> Option<(BinaryOperator, Precedence)> {
    match token {
        Token::Or => Some((BinaryOperator::Or, Precedence::Or)),
        Token::And => Some((BinaryOperator::And, Precedence::And)),
        Token::Equal => Some((BinaryOperator::Equal, Precedence::Equality)),
        Token::NotEqual => Some((BinaryOperator::NotEqual, Precedence::Equality)),
        Token::Matches => Some((BinaryOperator::Matches, Precedence::Equality)),
        Token::LessThan => Some((BinaryOperator::LessThan, Precedence::Relational)),
        Token::LessThanOrEqual => Some((BinaryOperator::LessThanOrEqual, Precedence::Relational)),
        Token::GreaterThan => Some((BinaryOperator::GreaterThan, Precedence::Relational)),
        Token::GreaterThanOrEqual => {
            Some((BinaryOperator::GreaterThanOrEqual, Precedence::Relational))
        }
        _ => None,
    }
}

impl<'input> PathParser<'input> {
    /// Parse a full closure body expression
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_with(Precedence::Lowest)
    }

    fn parse_expression_with(&mut self, min: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let Some((op, precedence)) = self.tokens.peek().and_then(|t| infix_operator(&t.value))
            else {
                break;
            };
            if precedence <= min {
                break;
            }
            self.tokens.next();
            // Left associative: the right side only takes tighter operators
            let right = self.parse_expression_with(precedence)?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.tokens.consume_if(|t| matches!(t, Token::Not)).is_some() {
            let operand = self.parse_unary()?;
            return Ok(Expression::not(operand));
        }
        self.parse_operand()
    }

    fn parse_operand(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.tokens.peek() else {
            return Err(ParseError::UnexpectedEof {
                expected: Cow::Borrowed("expression"),
            });
        };
        let start = token.start;

        match &token.value {
            Token::LeftParen => {
                let open = token.clone();
                self.tokens.next();
                let inner = self.parse_expression()?;
                self.tokens.expect_closing(&open)?;
                Ok(inner)
            }
            Token::String(_) | Token::Integer(_) | Token::Decimal(_) | Token::Minus => {
                self.parse_literal().map(Expression::literal)
            }
            Token::Identifier("true") => {
                self.tokens.next();
                Ok(Expression::literal(LiteralValue::Boolean(true)))
            }
            Token::Identifier("false") => {
                self.tokens.next();
                Ok(Expression::literal(LiteralValue::Boolean(false)))
            }
            Token::Identifier("null") => {
                self.tokens.next();
                Ok(Expression::literal(LiteralValue::Null))
            }
            Token::Identifier(name) if Some(name) == self.parameters.last() => {
                self.tokens.next();
                self.parse_field_after_parameter()
            }
            Token::Identifier(_) | Token::At | Token::Star | Token::DoubleStar => {
                let mut steps = Vec::new();
                self.parse_segments(&mut steps)?;
                Ok(Expression::field(PathExpression::new(steps)))
            }
            other => Err(unexpected(other, start)),
        }
    }

    /// Field steps following the closure parameter: `it`, `it.name`, `it[0]`
    fn parse_field_after_parameter(&mut self) -> ParseResult<Expression> {
        let mut steps = Vec::new();
        while let Some(open) = self.tokens.consume_if(|t| matches!(t, Token::LeftBracket)) {
            let index = self.parse_index(&open)?;
            steps.push(Step::Index(index));
        }
        if self.tokens.consume_if(|t| matches!(t, Token::Dot)).is_some() {
            self.parse_segments(&mut steps)?;
        }
        Ok(Expression::field(PathExpression::new(steps)))
    }

    fn parse_literal(&mut self) -> ParseResult<LiteralValue> {
        let negative = self.tokens.consume_if(|t| matches!(t, Token::Minus));
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::UnexpectedEof {
                expected: Cow::Borrowed("number"),
            });
        };

        match (negative, token.value) {
            (None, Token::String(text)) => Ok(LiteralValue::String(text.into_owned())),
            (None, Token::Integer(n)) => Ok(LiteralValue::Integer(n)),
            (Some(_), Token::Integer(n)) => Ok(LiteralValue::Integer(-n)),
            (sign, Token::Decimal(text)) => {
                let value = Decimal::from_str(text).map_err(|_| ParseError::InvalidLiteral {
                    literal_type: "decimal",
                    value: text.to_string(),
                    position: token.start,
                })?;
                Ok(LiteralValue::Decimal(if sign.is_some() { -value } else { value }))
            }
            (_, other) => Err(unexpected(&other, token.start)),
        }
    }
}
