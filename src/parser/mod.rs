//! Path expression parser
//!
//! Turns path text such as `shopping.category.find { it.@type == 'groceries' }.item[0]`
//! into a [`PathExpression`]. Tokenization is byte-oriented; segments are parsed by
//! recursive descent and closure bodies by a small Pratt parser.

pub mod error;
pub mod lexer;
mod path;
mod pratt;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use pratt::Precedence;
pub use span::Spanned;
pub use tokenizer::{Token, Tokenizer, tokenize};

use crate::ast::PathExpression;

/// Parse path text into a compiled path
///
/// `$` and the empty string both select the document root.
pub fn parse(input: &str) -> ParseResult<PathExpression> {
    path::PathParser::new(input)?.parse_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Expression, FunctionCall, LiteralValue, Step};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn child(name: &str) -> Step {
        Step::Child(name.to_string())
    }

    fn field(steps: Vec<Step>) -> Expression {
        Expression::field(PathExpression::new(steps))
    }

    fn string(text: &str) -> Expression {
        Expression::literal(LiteralValue::String(text.to_string()))
    }

    fn integer(n: i64) -> Expression {
        Expression::literal(LiteralValue::Integer(n))
    }

    #[test]
    fn test_dotted_path_with_index_and_attribute() {
        let path = parse("shopping.category[1].@type").unwrap();
        assert_eq!(
            path.steps(),
            &[
                child("shopping"),
                child("category"),
                Step::Index(1),
                Step::Attribute("type".to_string()),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("$")]
    #[case("  $ ")]
    fn test_root_paths(#[case] input: &str) {
        assert_eq!(parse(input).unwrap(), PathExpression::root());
    }

    #[test]
    fn test_dollar_prefix() {
        assert_eq!(parse("$.shopping").unwrap().steps(), &[child("shopping")]);
    }

    #[test]
    fn test_wildcards_and_quoted_names() {
        let path = parse("shopping.**.'first name'.*").unwrap();
        assert_eq!(
            path.steps(),
            &[
                child("shopping"),
                Step::RecursiveDescent,
                child("first name"),
                Step::Wildcard,
            ]
        );
    }

    #[test]
    fn test_function_call() {
        let path = parse("shopping.category.item.size()").unwrap();
        assert_eq!(
            path.steps()[3],
            Step::Function(Box::new(FunctionCall::new("size")))
        );
    }

    #[test]
    fn test_find_closure() {
        let path = parse("shopping.category.find { it.@type == 'groceries' }.item").unwrap();
        let condition = Expression::binary(
            BinaryOperator::Equal,
            field(vec![Step::Attribute("type".to_string())]),
            string("groceries"),
        );
        assert_eq!(
            path.steps(),
            &[
                child("shopping"),
                child("category"),
                Step::Function(Box::new(FunctionCall::with_args("find", [condition]))),
                child("item"),
            ]
        );
    }

    #[test]
    fn test_named_parameter() {
        let implicit = parse("item.findAll { it.price > 10 }").unwrap();
        let explicit = parse("item.findAll { item -> item.price > 10 }").unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_bare_names_are_relative_to_member() {
        let bare = parse("item.findAll { price > 10 }").unwrap();
        let qualified = parse("item.findAll { it.price > 10 }").unwrap();
        assert_eq!(bare, qualified);
    }

    #[test]
    fn test_child_filter() {
        let path = parse("category.item { it.price >= 10 }").unwrap();
        let condition = Expression::binary(
            BinaryOperator::GreaterThanOrEqual,
            field(vec![child("price")]),
            integer(10),
        );
        assert_eq!(
            path.steps(),
            &[
                child("category"),
                child("item"),
                Step::Predicate(Box::new(condition)),
            ]
        );
    }

    #[test]
    fn test_operator_precedence() {
        let path = parse("item.find { it.a == 1 || it.b == 2 && !(it.c == 3) }").unwrap();
        let Step::Function(call) = &path.steps()[1] else {
            panic!("expected a function step");
        };
        let eq = |name: &str, n: i64| {
            Expression::binary(BinaryOperator::Equal, field(vec![child(name)]), integer(n))
        };
        let expected = Expression::binary(
            BinaryOperator::Or,
            eq("a", 1),
            Expression::binary(
                BinaryOperator::And,
                eq("b", 2),
                Expression::not(eq("c", 3)),
            ),
        );
        assert_eq!(call.args[0], expected);
    }

    #[test]
    fn test_literals() {
        let path = parse("item.find { it.price < -2.5 || it.price == -3 || it.sold == true }")
            .unwrap();
        let rendered = path.to_string();
        assert!(rendered.contains("-2.5"), "{rendered}");
        assert!(rendered.contains("-3"), "{rendered}");
        assert!(rendered.contains("true"), "{rendered}");
    }

    #[test]
    fn test_boolean_function_condition() {
        assert!(parse("item.findAll { !it.name.isEmpty() }").is_ok());
        assert!(parse("item.findAll { it.@sale.toBoolean() }").is_ok());
    }

    #[test]
    fn test_collect_entries() {
        let path = parse("item.collectEntries { it.@id : it.name }").unwrap();
        assert_eq!(
            path.steps()[1],
            Step::Function(Box::new(FunctionCall::with_args(
                "collectEntries",
                [
                    field(vec![Step::Attribute("id".to_string())]),
                    field(vec![child("name")]),
                ],
            )))
        );
    }

    #[test]
    fn test_nested_closures() {
        let path =
            parse("category.findAll { it.item.find { it.price > 10 }.size() > 0 }").unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_display_reparses() {
        let input = "shopping.category.find { it.@type == 'groceries' }.item[0].name";
        let path = parse(input).unwrap();
        assert_eq!(parse(&path.to_string()).unwrap(), path);
    }

    #[rstest]
    #[case("a[-1]", ParseError::NegativeIndex { position: 2 })]
    #[case("a[0", ParseError::UnbalancedDelimiter { delimiter: '[', position: 1 })]
    #[case("a]", ParseError::UnbalancedDelimiter { delimiter: ']', position: 1 })]
    #[case("a.size(1)", ParseError::FunctionArguments { name: "size".into(), position: 2 })]
    #[case("a.find { it.name }", ParseError::NonBooleanPredicate { position: 9 })]
    #[case("a[x]", ParseError::InvalidIndex { value: "x".into(), position: 2 })]
    #[case("a.find { it.x == 1", ParseError::UnbalancedDelimiter { delimiter: '{', position: 7 })]
    fn test_parse_errors(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(parse(input), Err(expected));
    }

    #[rstest]
    #[case("a.collectEntries { it.@id }")]
    #[case("a.find { }")]
    fn test_invalid_closures(#[case] input: &str) {
        assert!(matches!(parse(input), Err(ParseError::InvalidClosure { .. })));
    }

    #[rstest]
    #[case("a b")]
    #[case("a..b")]
    #[case("a.")]
    #[case("a.'open")]
    fn test_malformed(#[case] input: &str) {
        assert!(parse(input).is_err(), "{input} should not parse");
    }
}
