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

//! Core value type for path evaluation results

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::collection::NodeCollection;
use super::element::Node;

/// Map produced by `attributes()` and `collectEntries`; `None` keys and
/// [`XmlPathValue::Empty`] values stand for null entries
pub type PathMap = IndexMap<Option<String>, XmlPathValue>;

/// Result of evaluating a path expression
///
/// Navigation results are normalized: a step that matches nothing yields
/// [`XmlPathValue::Empty`], one match yields [`XmlPathValue::Node`] and several
/// matches yield [`XmlPathValue::Nodes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmlPathValue {
    /// A single element
    Node(Node),

    /// Several elements in document order
    Nodes(NodeCollection),

    /// Text, such as an attribute value or the result of `text()`
    String(String),

    /// Integer value (64-bit signed)
    Integer(i64),

    /// Decimal value with arbitrary precision
    Decimal(Decimal),

    /// Boolean value
    Boolean(bool),

    /// Plain ordered list of values
    List(Arc<[XmlPathValue]>),

    /// Key/value map
    Map(Arc<PathMap>),

    /// Absent value
    Empty,
}

impl XmlPathValue {
    /// Normalize a node match list
    pub fn from_nodes(mut nodes: Vec<Node>) -> Self {
        match nodes.len() {
            0 => XmlPathValue::Empty,
            1 => nodes.pop().map_or(XmlPathValue::Empty, XmlPathValue::Node),
            _ => XmlPathValue::Nodes(NodeCollection::from_vec(nodes)),
        }
    }

    /// Normalize a list of values, collapsing all-node lists the same way
    /// as [`XmlPathValue::from_nodes`]
    pub fn from_values(mut values: Vec<XmlPathValue>) -> Self {
        if values.iter().all(|v| matches!(v, XmlPathValue::Node(_))) {
            let nodes = values
                .into_iter()
                .filter_map(|v| match v {
                    XmlPathValue::Node(node) => Some(node),
                    _ => None,
                })
                .collect();
            return Self::from_nodes(nodes);
        }
        match values.len() {
            1 => values.pop().unwrap_or(XmlPathValue::Empty),
            _ => XmlPathValue::List(Arc::from(values)),
        }
    }

    /// Plain list without normalization
    pub fn list(values: Vec<XmlPathValue>) -> Self {
        XmlPathValue::List(Arc::from(values))
    }

    /// Create a string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        XmlPathValue::String(s.into())
    }

    /// Number of members: 0 when absent, the member count for collections,
    /// lists and maps, 1 otherwise
    pub fn len(&self) -> usize {
        match self {
            XmlPathValue::Empty => 0,
            XmlPathValue::Nodes(nodes) => nodes.len(),
            XmlPathValue::List(items) => items.len(),
            XmlPathValue::Map(map) => map.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members as individual values
    pub fn members(&self) -> Vec<XmlPathValue> {
        match self {
            XmlPathValue::Empty => Vec::new(),
            XmlPathValue::Nodes(nodes) => nodes.iter().cloned().map(XmlPathValue::Node).collect(),
            XmlPathValue::List(items) => items.to_vec(),
            other => vec![other.clone()],
        }
    }

    /// Member at `index`, if any
    pub fn member(&self, index: usize) -> Option<XmlPathValue> {
        match self {
            XmlPathValue::Empty => None,
            XmlPathValue::Nodes(nodes) => nodes.get(index).cloned().map(XmlPathValue::Node),
            XmlPathValue::List(items) => items.get(index).cloned(),
            XmlPathValue::Map(_) => None,
            other if index == 0 => Some(other.clone()),
            _ => None,
        }
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            XmlPathValue::Node(_) => "Node",
            XmlPathValue::Nodes(_) => "NodeCollection",
            XmlPathValue::String(_) => "String",
            XmlPathValue::Integer(_) => "Integer",
            XmlPathValue::Decimal(_) => "Decimal",
            XmlPathValue::Boolean(_) => "Boolean",
            XmlPathValue::List(_) => "List",
            XmlPathValue::Map(_) => "Map",
            XmlPathValue::Empty => "Empty",
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            XmlPathValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&NodeCollection> {
        match self {
            XmlPathValue::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            XmlPathValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value holds elements
    pub fn is_node_like(&self) -> bool {
        matches!(self, XmlPathValue::Node(_) | XmlPathValue::Nodes(_))
    }

    /// Text form of the value; `None` when absent
    ///
    /// Elements contribute their full text, collections and lists the
    /// concatenation of their members.
    pub fn to_text(&self) -> Option<String> {
        match self {
            XmlPathValue::Empty => None,
            XmlPathValue::Node(node) => Some(node.full_text()),
            XmlPathValue::Nodes(nodes) => Some(nodes.texts().concat()),
            XmlPathValue::String(s) => Some(s.clone()),
            XmlPathValue::Integer(i) => Some(i.to_string()),
            XmlPathValue::Decimal(d) => Some(d.normalize().to_string()),
            XmlPathValue::Boolean(b) => Some(b.to_string()),
            XmlPathValue::List(items) => Some(items.iter().filter_map(|v| v.to_text()).collect()),
            XmlPathValue::Map(_) => Some(self.to_string()),
        }
    }

    /// Numeric view of the value, parsing text when needed
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            XmlPathValue::Integer(i) => Some(Decimal::from(*i)),
            XmlPathValue::Decimal(d) => Some(*d),
            XmlPathValue::Boolean(_) | XmlPathValue::Map(_) | XmlPathValue::Empty => None,
            other => other.to_text().and_then(|text| parse_decimal_text(&text)),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, XmlPathValue::Integer(_) | XmlPathValue::Decimal(_))
    }
}

/// Parse trimmed text as a decimal, accepting scientific notation
pub(crate) fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

impl fmt::Display for XmlPathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlPathValue::Empty => Ok(()),
            XmlPathValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            XmlPathValue::Map(map) => {
                write!(f, "[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match (key, value) {
                        (Some(key), XmlPathValue::Empty) => write!(f, "{key}:null")?,
                        (Some(key), value) => write!(f, "{key}:{value}")?,
                        (None, XmlPathValue::Empty) => write!(f, "null:null")?,
                        (None, value) => write!(f, "null:{value}")?,
                    }
                }
                write!(f, "]")
            }
            other => match other.to_text() {
                Some(text) => f.write_str(&text),
                None => Ok(()),
            },
        }
    }
}

impl From<Node> for XmlPathValue {
    fn from(node: Node) -> Self {
        XmlPathValue::Node(node)
    }
}

impl From<NodeCollection> for XmlPathValue {
    fn from(nodes: NodeCollection) -> Self {
        XmlPathValue::Nodes(nodes)
    }
}

impl From<String> for XmlPathValue {
    fn from(s: String) -> Self {
        XmlPathValue::String(s)
    }
}

impl From<&str> for XmlPathValue {
    fn from(s: &str) -> Self {
        XmlPathValue::String(s.to_string())
    }
}

impl From<i64> for XmlPathValue {
    fn from(i: i64) -> Self {
        XmlPathValue::Integer(i)
    }
}

impl From<Decimal> for XmlPathValue {
    fn from(d: Decimal) -> Self {
        XmlPathValue::Decimal(d)
    }
}

impl From<bool> for XmlPathValue {
    fn from(b: bool) -> Self {
        XmlPathValue::Boolean(b)
    }
}
