//! Document tree and value model
//!
//! The tree types are produced by the markup front ends; the value types are
//! produced by path evaluation and consumed by the coercion layer.

pub mod collection;
pub mod element;
pub mod type_coercion;
pub mod types;
pub mod value;

pub use collection::NodeCollection;
pub use element::{BreadthFirst, Content, DepthFirst, Element, ElementBuilder, Node};
pub use type_coercion::{CoercionError, CoercionResult, FromXmlPathValue, TypeCoercion};
pub use types::TypeInfo;
pub use value::{PathMap, XmlPathValue};
