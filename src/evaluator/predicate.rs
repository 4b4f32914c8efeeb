//! Closure body evaluation
//!
//! Conditions are evaluated once per member, with the member bound to the
//! closure parameter. Fields are paths relative to the member.

use super::engine::PathEvaluator;
use super::error::{EvaluationError, EvaluationResult};
use crate::ast::{BinaryOperator, Expression, LiteralValue, UnaryOperator};
use crate::model::XmlPathValue;
use crate::model::value::parse_decimal_text;
use regex::Regex;
use rust_decimal::Decimal;
use std::cmp::Ordering;

impl PathEvaluator {
    /// Whether `member` satisfies `condition`
    pub(super) fn test(
        &self,
        condition: &Expression,
        member: &XmlPathValue,
    ) -> EvaluationResult<bool> {
        self.evaluate_expression(condition, member)
            .map(|value| is_truthy(&value))
    }

    /// Value of a closure expression for one member
    pub(super) fn evaluate_expression(
        &self,
        expression: &Expression,
        member: &XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        match expression {
            Expression::Literal(literal) => Ok(literal_value(literal)),
            Expression::Field(path) => self.evaluate(path, member.clone()),
            Expression::UnaryOp {
                op: UnaryOperator::Not,
                operand,
            } => Ok(XmlPathValue::Boolean(!self.test(operand, member)?)),
            Expression::BinaryOp(data) => match data.op {
                BinaryOperator::And => Ok(XmlPathValue::Boolean(
                    self.test(&data.left, member)? && self.test(&data.right, member)?,
                )),
                BinaryOperator::Or => Ok(XmlPathValue::Boolean(
                    self.test(&data.left, member)? || self.test(&data.right, member)?,
                )),
                op => {
                    let left = self.evaluate_expression(&data.left, member)?;
                    let right = self.evaluate_expression(&data.right, member)?;
                    compare(op, &left, &right).map(XmlPathValue::Boolean)
                }
            },
        }
    }
}

fn literal_value(literal: &LiteralValue) -> XmlPathValue {
    match literal {
        LiteralValue::String(s) => XmlPathValue::String(s.clone()),
        LiteralValue::Integer(i) => XmlPathValue::Integer(*i),
        LiteralValue::Decimal(d) => XmlPathValue::Decimal(*d),
        LiteralValue::Boolean(b) => XmlPathValue::Boolean(*b),
        LiteralValue::Null => XmlPathValue::Empty,
    }
}

/// Truth of a condition result: absent, `false`, zero and empty text or
/// collections are false
pub(crate) fn is_truthy(value: &XmlPathValue) -> bool {
    match value {
        XmlPathValue::Empty => false,
        XmlPathValue::Boolean(b) => *b,
        XmlPathValue::Integer(i) => *i != 0,
        XmlPathValue::Decimal(d) => !d.is_zero(),
        XmlPathValue::String(s) => !s.is_empty(),
        XmlPathValue::Node(_) => true,
        other => !other.is_empty(),
    }
}

/// Apply a comparison operator
pub(crate) fn compare(
    op: BinaryOperator,
    left: &XmlPathValue,
    right: &XmlPathValue,
) -> EvaluationResult<bool> {
    match op {
        BinaryOperator::Equal => Ok(values_equal(left, right)),
        BinaryOperator::NotEqual => Ok(!values_equal(left, right)),
        BinaryOperator::Matches => full_match(left, right),
        BinaryOperator::LessThan => Ok(order(left, right)?.is_some_and(Ordering::is_lt)),
        BinaryOperator::LessThanOrEqual => Ok(order(left, right)?.is_some_and(Ordering::is_le)),
        BinaryOperator::GreaterThan => Ok(order(left, right)?.is_some_and(Ordering::is_gt)),
        BinaryOperator::GreaterThanOrEqual => {
            Ok(order(left, right)?.is_some_and(Ordering::is_ge))
        }
        // Logical operators are handled before their operands are evaluated
        BinaryOperator::And => Ok(is_truthy(left) && is_truthy(right)),
        BinaryOperator::Or => Ok(is_truthy(left) || is_truthy(right)),
    }
}

fn values_equal(left: &XmlPathValue, right: &XmlPathValue) -> bool {
    match (left, right) {
        (XmlPathValue::Empty, XmlPathValue::Empty) => true,
        (XmlPathValue::Empty, _) | (_, XmlPathValue::Empty) => false,
        (l, r) if l.is_numeric() || r.is_numeric() => {
            match (l.to_decimal(), r.to_decimal()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (XmlPathValue::Boolean(b), other) | (other, XmlPathValue::Boolean(b)) => {
            as_boolean(other) == Some(*b)
        }
        (l, r) => l.to_text() == r.to_text(),
    }
}

fn as_boolean(value: &XmlPathValue) -> Option<bool> {
    match value {
        XmlPathValue::Boolean(b) => Some(*b),
        other => {
            let text = other.to_text()?;
            match text.trim() {
                t if t.eq_ignore_ascii_case("true") => Some(true),
                t if t.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            }
        }
    }
}

/// Ordering for relational operators; `None` when either side is absent
fn order(left: &XmlPathValue, right: &XmlPathValue) -> EvaluationResult<Option<Ordering>> {
    if matches!(left, XmlPathValue::Empty) || matches!(right, XmlPathValue::Empty) {
        return Ok(None);
    }
    if left.is_numeric() || right.is_numeric() {
        let a = numeric(left)?;
        let b = numeric(right)?;
        return Ok(Some(a.cmp(&b)));
    }

    let left_text = left.to_text().unwrap_or_default();
    let right_text = right.to_text().unwrap_or_default();
    match (parse_decimal_text(&left_text), parse_decimal_text(&right_text)) {
        (Some(a), Some(b)) => Ok(Some(a.cmp(&b))),
        _ => Ok(Some(left_text.cmp(&right_text))),
    }
}

fn numeric(value: &XmlPathValue) -> EvaluationResult<Decimal> {
    value.to_decimal().ok_or_else(|| EvaluationError::NonNumeric {
        value: value.to_text().unwrap_or_default(),
    })
}

/// `==~`: the whole left text must match the right pattern
fn full_match(left: &XmlPathValue, right: &XmlPathValue) -> EvaluationResult<bool> {
    let (Some(text), Some(pattern)) = (left.to_text(), right.to_text()) else {
        return Ok(false);
    };
    let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        EvaluationError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        }
    })?;
    Ok(regex.is_match(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(s: &str) -> XmlPathValue {
        XmlPathValue::from(s)
    }

    #[rstest]
    #[case(text("10"), XmlPathValue::Integer(10), true)]
    #[case(text("10.0"), XmlPathValue::Integer(10), true)]
    #[case(text("ten"), XmlPathValue::Integer(10), false)]
    #[case(text("TRUE"), XmlPathValue::Boolean(true), true)]
    #[case(text("yes"), XmlPathValue::Boolean(true), false)]
    #[case(text("abc"), text("abc"), true)]
    #[case(XmlPathValue::Empty, XmlPathValue::Empty, true)]
    #[case(XmlPathValue::Empty, text(""), false)]
    fn test_equality(
        #[case] left: XmlPathValue,
        #[case] right: XmlPathValue,
        #[case] expected: bool,
    ) {
        assert_eq!(compare(BinaryOperator::Equal, &left, &right), Ok(expected));
        assert_eq!(compare(BinaryOperator::NotEqual, &left, &right), Ok(!expected));
    }

    #[test]
    fn test_relational_coerces_text() {
        assert_eq!(
            compare(BinaryOperator::GreaterThan, &text("20"), &XmlPathValue::Integer(10)),
            Ok(true)
        );
        // both sides numeric text: compared as numbers, not lexicographically
        assert_eq!(compare(BinaryOperator::LessThan, &text("9"), &text("10")), Ok(true));
        assert_eq!(compare(BinaryOperator::LessThan, &text("b"), &text("a")), Ok(false));
        assert_eq!(
            compare(BinaryOperator::LessThanOrEqual, &XmlPathValue::Empty, &XmlPathValue::Integer(1)),
            Ok(false)
        );
        assert_eq!(
            compare(BinaryOperator::LessThan, &text("cheap"), &XmlPathValue::Integer(10)),
            Err(EvaluationError::NonNumeric {
                value: "cheap".to_string()
            })
        );
    }

    #[test]
    fn test_pattern_match_is_anchored() {
        let pattern = text("Cho.*");
        assert_eq!(compare(BinaryOperator::Matches, &text("Chocolate"), &pattern), Ok(true));
        assert_eq!(compare(BinaryOperator::Matches, &text("Hot Chocolate"), &pattern), Ok(false));
        assert!(matches!(
            compare(BinaryOperator::Matches, &text("x"), &text("(")),
            Err(EvaluationError::InvalidPattern { .. })
        ));
    }

    #[rstest]
    #[case(XmlPathValue::Empty, false)]
    #[case(XmlPathValue::Boolean(false), false)]
    #[case(XmlPathValue::Integer(0), false)]
    #[case(text(""), false)]
    #[case(text("x"), true)]
    #[case(XmlPathValue::list(vec![]), false)]
    fn test_truthiness(#[case] value: XmlPathValue, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }
}
