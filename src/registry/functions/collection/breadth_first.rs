//! breadthFirst() function - every member and its descendants, level by level

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;
use rustc_hash::FxHashSet;

/// breadthFirst() function - every member and its descendants, level by level
pub struct BreadthFirstFunction;

impl XmlPathFunction for BreadthFirstFunction {
    fn name(&self) -> &str {
        "breadthFirst"
    }
    fn human_friendly_name(&self) -> &str {
        "Breadth First"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("breadthFirst", TypeInfo::NodeCollection)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the current node and all of its descendants in breadth-first order."
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
            .flat_map(|root| root.breadth_first())
            .filter(|node| seen.insert(node.identity()))
            .collect();
        Ok(XmlPathValue::from_nodes(nodes))
    }
}
