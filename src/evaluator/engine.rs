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

//! Step interpreter

use super::error::{EvaluationError, EvaluationResult};
use crate::ast::{Expression, FunctionCall, PathExpression, Step};
use crate::model::{Node, PathMap, XmlPathValue};
use crate::registry::{EvaluationContext, FunctionRegistry, create_standard_registry};
use rustc_hash::FxHashSet;
use std::sync::{Arc, LazyLock};

static STANDARD_FUNCTIONS: LazyLock<Arc<FunctionRegistry>> =
    LazyLock::new(|| Arc::new(create_standard_registry()));

/// Interprets compiled paths against a document tree
///
/// Each step consumes the current value and produces the next one. Node
/// matches are normalized after every step: nothing matched is
/// [`XmlPathValue::Empty`], one match is a single node, more is a collection.
#[derive(Debug, Clone)]
pub struct PathEvaluator {
    functions: Arc<FunctionRegistry>,
}

impl Default for PathEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathEvaluator {
    /// Evaluator using the built-in functions
    pub fn new() -> Self {
        Self {
            functions: Arc::clone(&STANDARD_FUNCTIONS),
        }
    }

    /// Evaluator using a custom function registry
    pub fn with_functions(functions: Arc<FunctionRegistry>) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Evaluate a path against a document whose root element is `root`
    ///
    /// The first step is matched against the root element itself, so
    /// `shopping.category` selects the categories of a `<shopping>` root.
    pub fn evaluate_document(
        &self,
        root: &Node,
        path: &PathExpression,
    ) -> EvaluationResult<XmlPathValue> {
        let document = Node::document(root.clone());
        match self.evaluate(path, XmlPathValue::Node(document))? {
            XmlPathValue::Node(node) if node.is_document() => Ok(XmlPathValue::Node(root.clone())),
            other => Ok(other),
        }
    }

    /// Evaluate a path starting from an arbitrary value
    pub fn evaluate(
        &self,
        path: &PathExpression,
        input: XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        path.steps()
            .iter()
            .try_fold(input, |current, step| self.apply_step(step, current))
    }

    fn apply_step(&self, step: &Step, input: XmlPathValue) -> EvaluationResult<XmlPathValue> {
        let output = match step {
            Step::Child(name) => {
                let nodes = navigable_nodes(&input, step)?;
                XmlPathValue::from_nodes(
                    nodes
                        .iter()
                        .flat_map(|node| node.children_named(name).cloned())
                        .collect(),
                )
            }
            Step::Wildcard => {
                let nodes = navigable_nodes(&input, step)?;
                XmlPathValue::from_nodes(
                    nodes
                        .iter()
                        .flat_map(|node| node.children().iter().cloned())
                        .collect(),
                )
            }
            Step::RecursiveDescent => {
                let nodes = navigable_nodes(&input, step)?;
                let mut seen = FxHashSet::default();
                XmlPathValue::from_nodes(
                    nodes
                        .iter()
                        .flat_map(|node| node.descendants_or_self())
                        .filter(|node| !node.is_document() && seen.insert(node.identity()))
                        .collect(),
                )
            }
            Step::Attribute(name) => {
                let nodes = navigable_nodes(&input, step)?;
                XmlPathValue::from_values(
                    nodes
                        .iter()
                        .filter_map(|node| node.attribute(name))
                        .map(XmlPathValue::string)
                        .collect(),
                )
            }
            Step::Index(index) => index_into(input.clone(), *index)?,
            Step::Predicate(condition) => self.find_all(condition, &input)?,
            Step::Function(call) => self.call_function(call, &input)?,
        };

        log::trace!(
            "{step}: {} -> {} ({} members)",
            input.type_name(),
            output.type_name(),
            output.len()
        );
        Ok(output)
    }

    fn call_function(
        &self,
        call: &FunctionCall,
        input: &XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        match (call.name.as_str(), call.args.as_slice()) {
            ("find", [condition]) => self.find(condition, input),
            ("findAll", [condition]) => self.find_all(condition, input),
            ("collectEntries", [key, value]) => self.collect_entries(key, value, input),
            (name, []) => {
                let context = EvaluationContext::new(input.clone());
                match self.functions.evaluate(name, &context) {
                    Some(result) => Ok(result?),
                    None => Err(EvaluationError::UnknownFunction {
                        name: name.to_string(),
                    }),
                }
            }
            (name, _) => Err(EvaluationError::UnknownFunction {
                name: name.to_string(),
            }),
        }
    }

    /// First member satisfying the condition
    fn find(
        &self,
        condition: &Expression,
        input: &XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        for member in input.members() {
            if self.test(condition, &member)? {
                return Ok(member);
            }
        }
        Ok(XmlPathValue::Empty)
    }

    /// All members satisfying the condition, in order
    fn find_all(
        &self,
        condition: &Expression,
        input: &XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        let mut matches = Vec::new();
        for member in input.members() {
            if self.test(condition, &member)? {
                matches.push(member);
            }
        }
        Ok(XmlPathValue::from_values(matches))
    }

    fn collect_entries(
        &self,
        key: &Expression,
        value: &Expression,
        input: &XmlPathValue,
    ) -> EvaluationResult<XmlPathValue> {
        let mut map = PathMap::new();
        for member in input.members() {
            let key = self.evaluate_expression(key, &member)?.to_text();
            let value = self.evaluate_expression(value, &member)?;
            map.insert(key, value);
        }
        Ok(XmlPathValue::Map(Arc::new(map)))
    }
}

/// Nodes a navigation step starts from
fn navigable_nodes(input: &XmlPathValue, step: &Step) -> EvaluationResult<Vec<Node>> {
    let invalid = |value: &XmlPathValue| EvaluationError::InvalidNavigation {
        step: step.to_string(),
        value_type: value.type_name(),
    };
    match input {
        XmlPathValue::Empty => Ok(Vec::new()),
        XmlPathValue::Node(node) => Ok(vec![node.clone()]),
        XmlPathValue::Nodes(nodes) => Ok(nodes.to_vec()),
        XmlPathValue::List(items) => items
            .iter()
            .map(|item| match item {
                XmlPathValue::Node(node) => Ok(node.clone()),
                other => Err(invalid(other)),
            })
            .collect(),
        other => Err(invalid(other)),
    }
}

fn index_into(input: XmlPathValue, index: usize) -> EvaluationResult<XmlPathValue> {
    match &input {
        XmlPathValue::Empty
        | XmlPathValue::Node(_)
        | XmlPathValue::Nodes(_)
        | XmlPathValue::List(_) => input.member(index).ok_or(EvaluationError::IndexOutOfBounds {
            index,
            size: input.len(),
        }),
        other => Err(EvaluationError::InvalidIndexTarget {
            value_type: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn shopping() -> Node {
        let item = |name: &str, price: &str| {
            Element::builder("item")
                .child(Element::builder("name").text(name).build())
                .child(Element::builder("price").text(price).build())
                .build()
        };
        Element::builder("shopping")
            .child(
                Element::builder("category")
                    .attribute("type", "groceries")
                    .child(item("Chocolate", "10"))
                    .child(item("Coffee", "20"))
                    .build(),
            )
            .child(
                Element::builder("category")
                    .attribute("type", "supplies")
                    .child(item("Paper", "5"))
                    .child(item("Pens", "15"))
                    .build(),
            )
            .child(
                Element::builder("category")
                    .attribute("type", "present")
                    .child(item("Kathryn's Birthday", "200"))
                    .build(),
            )
            .build()
    }

    fn eval(path: &str) -> EvaluationResult<XmlPathValue> {
        PathEvaluator::new().evaluate_document(&shopping(), &parse(path).unwrap())
    }

    fn text(path: &str) -> String {
        eval(path).unwrap().to_string()
    }

    #[test]
    fn test_root_selection() {
        assert_eq!(eval("").unwrap().as_node().map(|n| n.name().to_string()), Some("shopping".into()));
        assert_eq!(eval("shopping").unwrap().type_name(), "Node");
        assert_eq!(eval("other").unwrap(), XmlPathValue::Empty);
    }

    #[test]
    fn test_repeated_children_flatten() {
        assert_eq!(eval("shopping.category.item").unwrap().len(), 5);
        assert_eq!(text("shopping.category[0].item[1].name"), "Coffee");
    }

    #[test]
    fn test_index_rules() {
        assert_eq!(text("shopping[0].category[2].item.name"), "Kathryn's Birthday");
        assert_eq!(
            eval("shopping[1]"),
            Err(EvaluationError::IndexOutOfBounds { index: 1, size: 1 })
        );
        assert_eq!(
            eval("shopping.missing[0]"),
            Err(EvaluationError::IndexOutOfBounds { index: 0, size: 0 })
        );
        assert_eq!(
            eval("shopping.category[0].@type[0]"),
            Err(EvaluationError::InvalidIndexTarget { value_type: "String" })
        );
    }

    #[test]
    fn test_attributes() {
        assert_eq!(text("shopping.category[1].@type"), "supplies");
        assert_eq!(text("shopping.category.@type"), "[groceries, supplies, present]");
        assert_eq!(eval("shopping.@missing").unwrap(), XmlPathValue::Empty);
    }

    #[test]
    fn test_wildcard_and_recursive_descent() {
        assert_eq!(eval("shopping.*").unwrap().len(), 3);
        assert_eq!(eval("shopping.*.*").unwrap().len(), 5);
        // shopping, 3 categories, 5 items, 10 name/price leaves
        assert_eq!(eval("**").unwrap().len(), 19);
        assert_eq!(eval("shopping.category.**").unwrap().len(), 18);
        assert_eq!(text("**.find { it.name == 'Paper' }.price"), "5");
    }

    #[test]
    fn test_navigation_from_scalar_fails() {
        assert!(matches!(
            eval("shopping.category[0].@type.name"),
            Err(EvaluationError::InvalidNavigation { value_type: "String", .. })
        ));
    }

    #[test]
    fn test_closures() {
        assert_eq!(
            text("shopping.category.find { it.@type == 'present' }.item.name"),
            "Kathryn's Birthday"
        );
        assert_eq!(
            eval("shopping.category.findAll { it.@type != 'present' }").unwrap().len(),
            2
        );
        assert_eq!(
            eval("shopping.category.find { it.@type == 'toys' }").unwrap(),
            XmlPathValue::Empty
        );
        assert_eq!(
            text("shopping.category.@type.findAll { it ==~ 's.*' }"),
            "supplies"
        );
    }

    #[test]
    fn test_child_filter() {
        assert_eq!(
            text("shopping.category.item { it.price > 10 }.name.list()"),
            "[Coffee, Pens, Kathryn's Birthday]"
        );
    }

    #[test]
    fn test_collect_entries() {
        assert_eq!(
            text("shopping.category[0].item.collectEntries { it.name : it.price }"),
            "[Chocolate:10, Coffee:20]"
        );
        assert_eq!(
            text("shopping.category[0].item.collectEntries { it.@id : it.missing }"),
            "[null:null]"
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("shopping.category.item.size()").unwrap(), XmlPathValue::Integer(5));
        assert_eq!(
            eval("shopping.category[0].item[0].price.toInt()").unwrap(),
            XmlPathValue::Integer(10)
        );
        assert_eq!(
            eval("shopping.nothing()"),
            Err(EvaluationError::UnknownFunction { name: "nothing".into() })
        );
        assert!(matches!(
            eval("shopping.category[0].item[0].name.toInt()"),
            Err(EvaluationError::Function(_))
        ));
    }

    #[test]
    fn test_custom_registry() {
        let mut functions = FunctionRegistry::new();
        crate::registry::functions::register_node_functions(&mut functions);
        let evaluator = PathEvaluator::with_functions(Arc::new(functions));
        let path = parse("shopping.category[0].item[0].name.text()").unwrap();
        assert_eq!(
            evaluator.evaluate_document(&shopping(), &path).unwrap(),
            XmlPathValue::from("Chocolate")
        );
        let path = parse("shopping.category.size()").unwrap();
        assert!(evaluator.evaluate_document(&shopping(), &path).is_err());
    }
}
