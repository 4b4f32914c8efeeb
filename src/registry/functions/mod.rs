//! Built-in function implementations

pub mod collection;
pub mod conversion;
pub mod node;

pub use collection::*;
pub use conversion::*;
pub use node::*;

use crate::registry::function::FunctionRegistry;

/// Register every built-in function
pub fn register_builtin_functions(registry: &mut FunctionRegistry) {
    collection::register_collection_functions(registry);
    node::register_node_functions(registry);
    conversion::register_conversion_functions(registry);
}
