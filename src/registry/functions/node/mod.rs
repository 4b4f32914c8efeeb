//! Functions reading element properties

mod attributes;
mod name;
mod text;

pub use attributes::AttributesFunction;
pub use name::NameFunction;
pub use text::TextFunction;

use crate::registry::function::FunctionRegistry;

/// Register all node functions
pub fn register_node_functions(registry: &mut FunctionRegistry) {
    registry.register(TextFunction);
    registry.register(NameFunction);
    registry.register(AttributesFunction);
}
