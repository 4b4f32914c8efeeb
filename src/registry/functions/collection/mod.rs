//! Functions over the members of the current result

mod breadth_first;
mod children;
mod depth_first;
mod is_empty;
mod list;
mod size;

pub use breadth_first::BreadthFirstFunction;
pub use children::ChildrenFunction;
pub use depth_first::DepthFirstFunction;
pub use is_empty::IsEmptyFunction;
pub use list::ListFunction;
pub use size::SizeFunction;

use crate::model::{Node, XmlPathValue};
use crate::registry::function::FunctionRegistry;

/// Nodes of a node-shaped value; `None` for scalars, lists and maps
fn node_members(value: &XmlPathValue) -> Option<Vec<Node>> {
    match value {
        XmlPathValue::Empty => Some(Vec::new()),
        XmlPathValue::Node(node) => Some(vec![node.clone()]),
        XmlPathValue::Nodes(nodes) => Some(nodes.to_vec()),
        _ => None,
    }
}

/// Register all collection functions
pub fn register_collection_functions(registry: &mut FunctionRegistry) {
    registry.register(SizeFunction);
    registry.register(ListFunction);
    registry.register(ChildrenFunction);
    registry.register(IsEmptyFunction);
    registry.register(DepthFirstFunction);
    registry.register(BreadthFirstFunction);
}
