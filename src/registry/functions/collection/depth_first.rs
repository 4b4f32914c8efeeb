//! depthFirst() function - every member and its descendants, pre-order

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;
use rustc_hash::FxHashSet;

/// depthFirst() function - every member and its descendants, pre-order
pub struct DepthFirstFunction;

impl XmlPathFunction for DepthFirstFunction {
    fn name(&self) -> &str {
        "depthFirst"
    }
    fn human_friendly_name(&self) -> &str {
        "Depth First"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("depthFirst", TypeInfo::NodeCollection)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the current node and all of its descendants in depth-first pre-order. Equivalent to the `**` step."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        let Some(roots) = super::node_members(&context.input) else {
            return Err(self.invalid_input(format!(
                "cannot walk a {} value",
                context.input.type_name()
            )));
        };
        let mut seen = FxHashSet::default();
        let nodes = roots
            .iter()
            .flat_map(|root| root.descendants_or_self())
            .filter(|node| seen.insert(node.identity()))
            .collect();
        Ok(XmlPathValue::from_nodes(nodes))
    }
}
