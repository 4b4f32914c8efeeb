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

//! Closure body expressions

use super::operator::{BinaryOperator, UnaryOperator};
use super::step::{PathExpression, Step};
use rust_decimal::Decimal;
use std::fmt;

/// Zero-argument functions whose result is a boolean
pub const BOOLEAN_FUNCTIONS: &[&str] = &["isEmpty", "toBoolean"];

/// Literal values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// Quoted text
    String(String),
    /// Integer number
    Integer(i64),
    /// Decimal number
    Decimal(Decimal),
    /// `true` or `false`
    Boolean(bool),
    /// `null`
    Null,
}

/// Expression inside a closure body such as `find { it.@type == 'present' }`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Literal value
    Literal(LiteralValue),

    /// Path relative to the closure member; no steps means the member itself
    Field(PathExpression),

    /// Comparison or logical operation (boxed for size optimization)
    BinaryOp(Box<BinaryOpData>),

    /// Negation
    UnaryOp {
        /// The operator
        op: UnaryOperator,
        /// The operand
        operand: Box<Expression>,
    },
}

/// Binary operation data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryOpData {
    /// The operator
    pub op: BinaryOperator,
    /// Left operand
    pub left: Expression,
    /// Right operand
    pub right: Expression,
}

impl Expression {
    pub fn literal(value: LiteralValue) -> Self {
        Expression::Literal(value)
    }

    pub fn field(path: PathExpression) -> Self {
        Expression::Field(path)
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp(Box::new(BinaryOpData { op, left, right }))
    }

    pub fn not(operand: Expression) -> Self {
        Expression::UnaryOp {
            op: UnaryOperator::Not,
            operand: Box::new(operand),
        }
    }

    /// Whether the expression always evaluates to a boolean
    pub fn is_boolean(&self) -> bool {
        match self {
            Expression::Literal(LiteralValue::Boolean(_)) => true,
            Expression::Literal(_) => false,
            Expression::Field(path) => matches!(
                path.steps().last(),
                Some(Step::Function(call)) if BOOLEAN_FUNCTIONS.contains(&call.name.as_str())
            ),
            Expression::BinaryOp(data) if data.op.is_logical() => {
                data.left.is_boolean() && data.right.is_boolean()
            }
            Expression::BinaryOp(_) => true,
            Expression::UnaryOp { operand, .. } => operand.is_boolean(),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write_quoted(f, s),
            LiteralValue::Integer(i) => write!(f, "{i}"),
            LiteralValue::Decimal(d) => write!(f, "{d}"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Field(path) if path.is_empty() => f.write_str("it"),
            Expression::Field(path) => write!(f, "it.{path}"),
            Expression::BinaryOp(data) => {
                write_operand(f, &data.left)?;
                write!(f, " {} ", data.op)?;
                write_operand(f, &data.right)
            }
            Expression::UnaryOp { op, operand } => {
                write!(f, "{op}")?;
                write_operand(f, operand)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression) -> fmt::Result {
    match operand {
        Expression::BinaryOp(_) => write!(f, "({operand})"),
        other => write!(f, "{other}"),
    }
}

/// Write text as a single-quoted literal
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in text.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}
