//! Ordered, shared node collections

use super::element::Node;
use serde::{Serialize, Serializer};
use std::ops::Index;
use std::sync::Arc;

/// An ordered sequence of nodes produced by a step that matched several elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCollection(Arc<[Node]>);

impl NodeCollection {
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn from_vec(nodes: Vec<Node>) -> Self {
        Self(Arc::from(nodes))
    }

    pub fn from_single(node: Node) -> Self {
        Self(Arc::from(vec![node]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&Node> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Node> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Node> {
        self.0.to_vec()
    }

    /// Full text of each member, in order
    pub fn texts(&self) -> Vec<String> {
        self.0.iter().map(|node| node.full_text()).collect()
    }
}

impl Default for NodeCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Node>> for NodeCollection {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_vec(nodes)
    }
}

impl FromIterator<Node> for NodeCollection {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NodeCollection {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for NodeCollection {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.0[index]
    }
}

impl Serialize for NodeCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
