//! Collection results: lists, maps and custom functions

mod common;

use common::shopping;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use std::sync::LazyLock;
use xmlpath::registry::signature::FunctionSignature;
use xmlpath::registry::{EvaluationContext, FunctionResult};
use xmlpath::{TypeInfo, XmlPathFunction, XmlPathValue, create_standard_registry};

#[test]
fn test_collect_entries_into_typed_map() {
    let xml = shopping();
    let prices = xml
        .get_map_of::<String, i32>("shopping.category[0].item.collectEntries { it.name : it.price }")
        .unwrap();

    let expected: IndexMap<_, _> = [
        (Some("Chocolate".to_string()), Some(10)),
        (Some("Coffee".to_string()), Some(20)),
    ]
    .into_iter()
    .collect();
    assert_eq!(*prices, expected);
}

#[test]
fn test_collect_entries_keeps_null_values() {
    let xml = shopping();
    let quantities = xml
        .get_map_of::<String, i64>(
            "shopping.category.item.collectEntries { item -> item.name : item.@quantity }",
        )
        .unwrap();

    assert_eq!(quantities.len(), 5);
    assert_eq!(quantities.get(&Some("Chocolate".to_string())), Some(&None));
    assert_eq!(quantities.get(&Some("Pens".to_string())), Some(&Some(4)));
}

#[test]
fn test_collect_entries_later_keys_win() {
    let xml = shopping();
    let by_type = xml
        .get_map("shopping.category.item.collectEntries { it.@quantity == null : it.name }")
        .unwrap();
    assert_eq!(by_type.len(), 2);
    assert_eq!(
        by_type
            .get(&Some("true".to_string()))
            .and_then(XmlPathValue::to_text),
        Some("Kathryn's Birthday".to_string())
    );
    assert_eq!(
        by_type
            .get(&Some("false".to_string()))
            .and_then(XmlPathValue::to_text),
        Some("Pens".to_string())
    );
}

#[test]
fn test_attributes_map() {
    let xml = shopping();
    let attributes = xml.get_map("shopping.category[1].item[1].attributes()").unwrap();
    assert_eq!(
        attributes.get(&Some("quantity".to_string())),
        Some(&XmlPathValue::from("4"))
    );
    assert_eq!(
        xml.get_value("shopping.category[1].item[1].attributes()")
            .unwrap()
            .to_string(),
        "[quantity:4]"
    );
}

#[test]
fn test_dynamic_map_target() {
    let xml = shopping();
    let value = xml
        .get_as(
            "shopping.category[0].item.collectEntries { it.name : it.price }",
            &TypeInfo::map_of(TypeInfo::String, TypeInfo::Integer),
        )
        .unwrap();
    assert_eq!(value.to_string(), "[Chocolate:10, Coffee:20]");
}

#[test]
fn test_list_functions() {
    let xml = shopping();
    assert_eq!(
        xml.get_list("shopping.category.item.name.list()").unwrap().as_ref(),
        &["Chocolate", "Coffee", "Paper", "Pens", "Kathryn's Birthday"]
    );
    assert_eq!(xml.get_int("shopping.category[0].children().size()").unwrap(), 2);
    assert_eq!(
        xml.get_list_of::<i64>("shopping.category[0].item.price")
            .unwrap()
            .as_ref(),
        &[10, 20]
    );
    // a single match is a one-entry list, nothing matched an empty one
    assert_eq!(xml.get_list("shopping.category[2].item.name").unwrap().len(), 1);
    assert!(xml.get_list("shopping.nothing").unwrap().is_empty());
}

#[test]
fn test_maps_are_not_lists() {
    let xml = shopping();
    let err = xml
        .get_list("shopping.category[0].attributes()")
        .unwrap_err();
    assert!(err.is_coercion_failure());

    let err = xml.get_map("shopping.category[0].item").unwrap_err();
    assert!(err.is_coercion_failure());
}

struct ShoutFunction;

impl XmlPathFunction for ShoutFunction {
    fn name(&self) -> &str {
        "shout"
    }
    fn human_friendly_name(&self) -> &str {
        "Shout"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: LazyLock<FunctionSignature> =
            LazyLock::new(|| FunctionSignature::new("shout", TypeInfo::String));
        &SIG
    }
    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        Ok(XmlPathValue::from_values(
            context
                .input
                .members()
                .iter()
                .filter_map(XmlPathValue::to_text)
                .map(|text| XmlPathValue::string(text.to_uppercase()))
                .collect(),
        ))
    }
}

#[test]
fn test_custom_function_registry() {
    let mut functions = create_standard_registry();
    functions.register(ShoutFunction);

    let xml = shopping().with_functions(functions);
    assert_eq!(
        xml.get_list("shopping.category[0].item.name.shout()")
            .unwrap()
            .as_ref(),
        &["CHOCOLATE", "COFFEE"]
    );
    assert_eq!(xml.get_int("shopping.category.size()").unwrap(), 3);

    let err = shopping()
        .get_value("shopping.category.shout()")
        .unwrap_err();
    assert!(err.is_evaluation_failure());
}
