//! GPath-style path queries over XML and HTML documents
//!
//! A document is parsed once into an immutable element tree. Paths such as
//! `shopping.category.findAll { it.@type == 'groceries' }.item.size()` are
//! compiled into a sequence of steps, evaluated against the tree, and the
//! result is converted to the type the caller asks for.
//!
//! ```
//! use xmlpath::XmlPath;
//!
//! let xml = XmlPath::new("<a><b>1</b><b>2</b></a>")?;
//! assert_eq!(xml.get_int("a.b.size()")?, 2);
//! assert_eq!(xml.get_list_of::<i64>("a.b")?.as_ref(), &[1, 2]);
//! # Ok::<(), xmlpath::XmlPathError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod registry;
pub mod serial;
pub mod source;
pub mod xml_path;

pub use ast::{Expression, PathExpression, Step};
pub use config::{CompatibilityMode, XmlPathConfig};
pub use error::{AcquisitionError, QueryError, Result, XmlPathError};
pub use evaluator::{EvaluationError, PathEvaluator};
pub use model::{
    CoercionError, Element, ElementBuilder, FromXmlPathValue, Node, NodeCollection, PathMap,
    TypeCoercion, TypeInfo, XmlPathValue,
};
pub use parser::{ParseError, parse};
pub use registry::{FunctionRegistry, XmlPathFunction, create_standard_registry};
pub use serial::prettify;
pub use xml_path::XmlPath;
