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

//! Query facade over a parsed document

use crate::ast::PathExpression;
use crate::config::{CompatibilityMode, XmlPathConfig};
use crate::error::{Result, XmlPathError};
use crate::evaluator::PathEvaluator;
use crate::model::{
    FromXmlPathValue, Node, NodeCollection, PathMap, TypeCoercion, TypeInfo, XmlPathValue,
};
use crate::parser;
use crate::registry::FunctionRegistry;
use crate::serial;
use crate::source;
use indexmap::IndexMap;
use log::debug;
use rust_decimal::Decimal;
use std::hash::Hash;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Path queries over an XML or HTML document
///
/// The document is parsed once at construction and never changes. Paths are
/// compiled per call; the root path set with [`XmlPath::set_root`] is compiled
/// once and prefixed to every later query.
///
/// ```
/// use xmlpath::XmlPath;
///
/// let xml = XmlPath::new(
///     "<shopping><category type='groceries'><item><name>Chocolate</name><price>10</price></item></category></shopping>",
/// )?;
/// assert_eq!(xml.get_string("shopping.category.item.name")?, "Chocolate");
/// assert_eq!(xml.get_int("shopping.category.find { it.@type == 'groceries' }.item.price")?, 10);
/// # Ok::<(), xmlpath::XmlPathError>(())
/// ```
#[derive(Debug, Clone)]
pub struct XmlPath {
    root: Node,
    config: XmlPathConfig,
    root_path: String,
    compiled_root: PathExpression,
    evaluator: PathEvaluator,
}

impl XmlPath {
    /// Parse well-formed XML text
    pub fn new(text: &str) -> Result<Self> {
        Self::with_config(text, XmlPathConfig::default())
    }

    /// Parse text in the given mode
    pub fn with_mode(mode: CompatibilityMode, text: &str) -> Result<Self> {
        Self::with_config(text, XmlPathConfig::for_mode(mode))
    }

    /// Parse text with explicit settings
    pub fn with_config(text: &str, config: XmlPathConfig) -> Result<Self> {
        let root = source::parse_document(text, &config)?;
        Ok(Self::from_parts(root, config))
    }

    /// Parse raw bytes; a UTF-8 byte order mark is skipped
    pub fn from_bytes(bytes: &[u8], config: XmlPathConfig) -> Result<Self> {
        let text = source::decode(bytes, config.mode)?;
        Self::with_config(&text, config)
    }

    /// Read the whole stream and parse it
    pub fn from_reader<R: Read>(reader: R, config: XmlPathConfig) -> Result<Self> {
        let text = source::read_source(reader, "stream", config.mode)?;
        Self::with_config(&text, config)
    }

    /// Read and parse a file
    pub fn from_file(path: impl AsRef<Path>, config: XmlPathConfig) -> Result<Self> {
        let text = source::read_file(path.as_ref(), config.mode)?;
        Self::with_config(&text, config)
    }

    /// Read and parse a `file:` URI
    pub fn from_uri(uri: &str, config: XmlPathConfig) -> Result<Self> {
        let text = source::read_uri(uri, config.mode)?;
        Self::with_config(&text, config)
    }

    /// Query an already built tree
    pub fn from_node(root: Node) -> Self {
        Self::from_parts(root, XmlPathConfig::default())
    }

    fn from_parts(root: Node, config: XmlPathConfig) -> Self {
        Self {
            root,
            config,
            root_path: String::new(),
            compiled_root: PathExpression::root(),
            evaluator: PathEvaluator::new(),
        }
    }

    /// Use a custom function registry for `name()` steps
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.evaluator = PathEvaluator::with_functions(Arc::new(functions));
        self
    }

    /// Acquisition settings the document was read with
    pub fn config(&self) -> &XmlPathConfig {
        &self.config
    }

    /// Prefix applied to every query, without a trailing dot
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Set the prefix for all later queries
    ///
    /// `set_root("shopping.category")` followed by `get("item")` is the same
    /// as `get("shopping.category.item")`. A trailing dot is ignored. On a
    /// parse failure the previous root path stays in effect.
    pub fn set_root(&mut self, root_path: &str) -> Result<&mut Self> {
        let trimmed = root_path.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        let compiled = parser::parse(trimmed).map_err(|e| XmlPathError::parse(root_path, e))?;
        debug!("root path set to '{trimmed}'");
        self.root_path = trimmed.to_string();
        self.compiled_root = compiled;
        Ok(self)
    }

    /// Consuming form of [`XmlPath::set_root`]
    pub fn with_root(mut self, root_path: &str) -> Result<Self> {
        self.set_root(root_path)?;
        Ok(self)
    }

    /// The document root element, regardless of the root path
    pub fn get_root(&self) -> Node {
        self.root.clone()
    }

    /// Evaluate a path and return the raw result
    pub fn get_value(&self, path: &str) -> Result<XmlPathValue> {
        let compiled = parser::parse(path).map_err(|e| XmlPathError::parse(path, e))?;
        let effective = self.compiled_root.join(&compiled);
        debug!("get '{path}' (root path '{}')", self.root_path);
        self.evaluator
            .evaluate_document(&self.root, &effective)
            .map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    /// Evaluate a path and convert the result
    pub fn get<T: FromXmlPathValue>(&self, path: &str) -> Result<T> {
        let value = self.get_value(path)?;
        T::from_path_value(value).map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    /// Evaluate a path and convert the result to a type chosen at run time
    pub fn get_as(&self, path: &str, target: &TypeInfo) -> Result<XmlPathValue> {
        let value = self.get_value(path)?;
        TypeCoercion::coerce_to_type(value, target)
            .map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    /// Text of every member of the result
    pub fn get_list(&self, path: &str) -> Result<Arc<[String]>> {
        let value = self.get_value(path)?;
        TypeCoercion::to_text_list(value)
            .map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    /// Every member of the result converted to `T`
    pub fn get_list_of<T: FromXmlPathValue>(&self, path: &str) -> Result<Arc<[T]>> {
        let value = self.get_value(path)?;
        TypeCoercion::to_list(value).map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    /// A map built by `collectEntries` or `attributes()`
    pub fn get_map(&self, path: &str) -> Result<Arc<PathMap>> {
        self.get(path)
    }

    /// A map with keys and values converted; null entries stay `None`
    pub fn get_map_of<K, V>(&self, path: &str) -> Result<Arc<IndexMap<Option<K>, Option<V>>>>
    where
        K: FromXmlPathValue + Hash + Eq,
        V: FromXmlPathValue,
    {
        let value = self.get_value(path)?;
        TypeCoercion::to_map(value).map_err(|e| XmlPathError::query(self.effective_path(path), e))
    }

    pub fn get_int(&self, path: &str) -> Result<i32> {
        self.get(path)
    }

    pub fn get_long(&self, path: &str) -> Result<i64> {
        self.get(path)
    }

    pub fn get_short(&self, path: &str) -> Result<i16> {
        self.get(path)
    }

    pub fn get_byte(&self, path: &str) -> Result<i8> {
        self.get(path)
    }

    pub fn get_char(&self, path: &str) -> Result<char> {
        self.get(path)
    }

    pub fn get_float(&self, path: &str) -> Result<f32> {
        self.get(path)
    }

    pub fn get_double(&self, path: &str) -> Result<f64> {
        self.get(path)
    }

    pub fn get_decimal(&self, path: &str) -> Result<Decimal> {
        self.get(path)
    }

    pub fn get_boolean(&self, path: &str) -> Result<bool> {
        self.get(path)
    }

    pub fn get_string(&self, path: &str) -> Result<String> {
        self.get(path)
    }

    /// A single element
    pub fn get_node(&self, path: &str) -> Result<Node> {
        self.get(path)
    }

    /// Matched elements; a single match gives one element and no match none
    pub fn get_node_children(&self, path: &str) -> Result<NodeCollection> {
        self.get(path)
    }

    /// The document as indented XML
    pub fn prettify(&self) -> Result<String> {
        serial::prettify(&self.root)
    }

    /// Print the indented document to stdout and return it
    pub fn pretty_print(&self) -> Result<String> {
        let pretty = self.prettify()?;
        println!("{pretty}");
        Ok(pretty)
    }

    fn effective_path(&self, path: &str) -> String {
        match (self.root_path.is_empty(), path.trim().is_empty()) {
            (true, _) => path.to_string(),
            (false, true) => self.root_path.clone(),
            (false, false) => format!("{}.{path}", self.root_path),
        }
    }
}

impl FromStr for XmlPath {
    type Err = XmlPathError;

    fn from_str(text: &str) -> Result<Self> {
        Self::new(text)
    }
}
