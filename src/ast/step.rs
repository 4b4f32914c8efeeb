//! Compiled path steps

use super::expression::{Expression, write_quoted};
use crate::parser::lexer::{is_identifier_continue, is_identifier_start};
use smallvec::SmallVec;
use std::fmt;

/// Functions that take a closure body, with the body shape they expect
pub const CLOSURE_FUNCTIONS: &[(&str, ClosureShape)] = &[
    ("find", ClosureShape::Predicate),
    ("findAll", ClosureShape::Predicate),
    ("collectEntries", ClosureShape::Entry),
];

/// Body shape of a closure function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosureShape {
    /// `{ condition }`
    Predicate,
    /// `{ key : value }`
    Entry,
}

/// Body shape for a closure function name, if it is one
pub fn closure_shape(name: &str) -> Option<ClosureShape> {
    CLOSURE_FUNCTIONS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, shape)| *shape)
}

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Children with the given tag name
    Child(String),
    /// Attribute value (`@name`)
    Attribute(String),
    /// Member at a zero-based position (`[n]`)
    Index(usize),
    /// All children (`*`)
    Wildcard,
    /// The node and all its descendants (`**`)
    RecursiveDescent,
    /// Members satisfying the condition (`name { condition }`)
    Predicate(Box<Expression>),
    /// Function call, with closure arguments for `find`, `findAll` and `collectEntries`
    Function(Box<FunctionCall>),
}

/// Function call data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Closure body parts: one condition, or a key and a value
    pub args: SmallVec<[Expression; 2]>,
}

impl FunctionCall {
    /// Zero-argument call
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// Call with closure body parts
    pub fn with_args(name: impl Into<String>, args: impl IntoIterator<Item = Expression>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }
}

/// A parsed path: an ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathExpression {
    steps: Vec<Step>,
}

impl PathExpression {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The empty path, selecting the document root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// This path followed by `other`
    pub fn join(&self, other: &PathExpression) -> PathExpression {
        let mut steps = Vec::with_capacity(self.steps.len() + other.steps.len());
        steps.extend_from_slice(&self.steps);
        steps.extend_from_slice(&other.steps);
        PathExpression { steps }
    }
}

impl From<Vec<Step>> for PathExpression {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_continue)
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Child(name) if is_plain_name(name) => f.write_str(name),
            Step::Child(name) => write_quoted(f, name),
            Step::Attribute(name) => write!(f, "@{name}"),
            Step::Index(index) => write!(f, "[{index}]"),
            Step::Wildcard => f.write_str("*"),
            Step::RecursiveDescent => f.write_str("**"),
            Step::Predicate(condition) => write!(f, " {{ {condition} }}"),
            Step::Function(call) => match call.args.as_slice() {
                [] => write!(f, "{}()", call.name),
                [key, value] => write!(f, "{} {{ {key} : {value} }}", call.name),
                args => {
                    write!(f, "{} {{ ", call.name)?;
                    for arg in args {
                        write!(f, "{arg} ")?;
                    }
                    f.write_str("}")
                }
            },
        }
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("$");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && !matches!(step, Step::Index(_) | Step::Predicate(_)) {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, LiteralValue};

    #[test]
    fn test_display_joins_steps() {
        let path = PathExpression::new(vec![
            Step::Child("shopping".into()),
            Step::Child("category".into()),
            Step::Index(0),
            Step::Attribute("type".into()),
        ]);
        assert_eq!(path.to_string(), "shopping.category[0].@type");
        assert_eq!(PathExpression::root().to_string(), "$");
    }

    #[test]
    fn test_display_quotes_odd_names_and_closures() {
        let condition = Expression::binary(
            BinaryOperator::Equal,
            Expression::field(PathExpression::new(vec![Step::Attribute("type".into())])),
            Expression::literal(LiteralValue::String("present".into())),
        );
        let path = PathExpression::new(vec![
            Step::Child("first name".into()),
            Step::Function(Box::new(FunctionCall::with_args("find", [condition]))),
        ]);
        assert_eq!(path.to_string(), "'first name'.find { it.@type == 'present' }");
    }

    #[test]
    fn test_join() {
        let root = PathExpression::new(vec![Step::Child("a".into())]);
        let rest = PathExpression::new(vec![Step::Wildcard]);
        assert_eq!(root.join(&rest).to_string(), "a.*");
    }

    #[test]
    fn test_closure_shapes() {
        assert_eq!(closure_shape("findAll"), Some(ClosureShape::Predicate));
        assert_eq!(closure_shape("collectEntries"), Some(ClosureShape::Entry));
        assert_eq!(closure_shape("size"), None);
    }
}
