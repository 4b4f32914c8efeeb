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

//! Immutable document tree
//!
//! Markup front ends assemble elements once through [`ElementBuilder`]. After
//! that the tree is only shared through [`Node`] handles and never mutated,
//! so handles can be cloned freely and sent across threads.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Name of the synthetic node that holds the root element during evaluation
pub const DOCUMENT_NODE_NAME: &str = "#document";

/// A run of character data, anchored before the child element at `position`
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextSegment {
    position: usize,
    text: String,
}

/// An element of the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    text: String,
    children: Vec<Node>,
    #[serde(skip)]
    segments: SmallVec<[TextSegment; 1]>,
}

/// One piece of element content in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// Character data
    Text(&'a str),
    /// A child element
    Element(&'a Node),
}

impl Element {
    /// Start building an element with the given tag name
    pub fn builder(name: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(name)
    }

    /// Tag name (local part only)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value, or `None` when the attribute is absent
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Direct character data of this element, excluding descendants
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text and child elements interleaved in document order
    pub fn content(&self) -> Vec<Content<'_>> {
        let mut content = Vec::with_capacity(self.children.len() + self.segments.len());
        let mut segments = self.segments.iter().peekable();
        for (index, child) in self.children.iter().enumerate() {
            while let Some(segment) = segments.next_if(|s| s.position == index) {
                content.push(Content::Text(&segment.text));
            }
            content.push(Content::Element(child));
        }
        content.extend(segments.map(|s| Content::Text(&s.text)));
        content
    }

    /// All character data of this element and its descendants in document order
    pub fn full_text(&self) -> String {
        if self.children.is_empty() {
            return self.text.clone();
        }
        let mut out = String::with_capacity(self.text.len() * 2);
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        for piece in self.content() {
            match piece {
                Content::Text(text) => out.push_str(text),
                Content::Element(child) => child.write_text(out),
            }
        }
    }

    /// Whether this is the synthetic document node
    pub fn is_document(&self) -> bool {
        self.name == DOCUMENT_NODE_NAME
    }
}

/// Shared handle to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node(Arc<Element>);

impl Node {
    /// Wrap the root element in the synthetic document node
    pub(crate) fn document(root: Node) -> Node {
        ElementBuilder::new(DOCUMENT_NODE_NAME).child(root).build()
    }

    /// Whether both handles point at the same element
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the underlying element, stable while any handle is alive
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// This node followed by all its descendants, depth-first pre-order
    pub fn descendants_or_self(&self) -> DepthFirst {
        DepthFirst {
            stack: vec![self.clone()],
        }
    }

    /// This node followed by all its descendants, level by level
    pub fn breadth_first(&self) -> BreadthFirst {
        BreadthFirst {
            queue: VecDeque::from([self.clone()]),
        }
    }

    /// Number of elements in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        self.descendants_or_self().count()
    }
}

impl Deref for Node {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Depth-first pre-order traversal
#[derive(Debug)]
pub struct DepthFirst {
    stack: Vec<Node>,
}

impl Iterator for DepthFirst {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().cloned());
        Some(node)
    }
}

/// Breadth-first traversal
#[derive(Debug)]
pub struct BreadthFirst {
    queue: VecDeque<Node>,
}

impl Iterator for BreadthFirst {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter().cloned());
        Some(node)
    }
}

/// Incremental element construction used by the markup front ends
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
    segments: SmallVec<[TextSegment; 1]>,
}

impl ElementBuilder {
    /// Create a builder for an element with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            segments: SmallVec::new(),
        }
    }

    /// Tag name of the element under construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    /// Append character data
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a child element
    pub fn child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }

    /// Add an attribute in place; a repeated name keeps the first value
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Append character data in place, merging with adjacent text
    pub fn push_text(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            return;
        }
        let position = self.children.len();
        match self.segments.last_mut() {
            Some(last) if last.position == position => last.text.push_str(text),
            _ => self.segments.push(TextSegment {
                position,
                text: text.to_string(),
            }),
        }
    }

    /// Append a child element in place
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Finish the element
    pub fn build(self) -> Node {
        let text = self.segments.iter().map(|s| s.text.as_str()).collect();
        Node(Arc::new(Element {
            name: self.name,
            attributes: self.attributes,
            text,
            children: self.children,
            segments: self.segments,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph() -> Node {
        Element::builder("p")
            .attribute("class", "lead")
            .text("Hello ")
            .child(Element::builder("b").text("big").build())
            .text(" world")
            .build()
    }

    #[test]
    fn test_direct_and_full_text() {
        let p = paragraph();
        assert_eq!(p.text(), "Hello  world");
        assert_eq!(p.full_text(), "Hello big world");
    }

    #[test]
    fn test_attribute_lookup() {
        let p = paragraph();
        assert_eq!(p.attribute("class"), Some("lead"));
        assert_eq!(p.attribute("id"), None);
    }

    #[test]
    fn test_content_order() {
        let p = paragraph();
        let content = p.content();
        assert_eq!(content.len(), 3);
        assert_eq!(content[0], Content::Text("Hello "));
        assert!(matches!(content[1], Content::Element(b) if b.name() == "b"));
        assert_eq!(content[2], Content::Text(" world"));
    }

    #[test]
    fn test_traversal_orders() {
        let tree = Element::builder("a")
            .child(
                Element::builder("b")
                    .child(Element::builder("d").build())
                    .build(),
            )
            .child(Element::builder("c").build())
            .build();

        let depth: Vec<_> = tree
            .descendants_or_self()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(depth, vec!["a", "b", "d", "c"]);

        let breadth: Vec<_> = tree.breadth_first().map(|n| n.name().to_string()).collect();
        assert_eq!(breadth, vec!["a", "b", "c", "d"]);
        assert_eq!(tree.subtree_size(), 4);
    }

    #[test]
    fn test_document_wrapper() {
        let root = paragraph();
        let document = Node::document(root.clone());
        assert!(document.is_document());
        assert!(document.children()[0].ptr_eq(&root));
        assert!(!root.is_document());
    }

    #[test]
    fn test_repeated_attribute_keeps_first() {
        let node = Element::builder("x")
            .attribute("k", "1")
            .attribute("k", "2")
            .build();
        assert_eq!(node.attribute("k"), Some("1"));
    }
}
