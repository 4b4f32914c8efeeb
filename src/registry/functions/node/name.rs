//! name() function - tag name of the current node

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// name() function - tag name of the current node
pub struct NameFunction;

impl XmlPathFunction for NameFunction {
    fn name(&self) -> &str {
        "name"
    }
    fn human_friendly_name(&self) -> &str {
        "Name"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("name", TypeInfo::String));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the tag name of the current node, or the list of tag names of a collection."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        match &context.input {
            XmlPathValue::Empty => Ok(XmlPathValue::Empty),
            XmlPathValue::Node(node) => Ok(XmlPathValue::string(node.name())),
            XmlPathValue::Nodes(nodes) => Ok(XmlPathValue::list(
                nodes.iter().map(|n| XmlPathValue::string(n.name())).collect(),
            )),
            other => Err(self.invalid_input(format!("{} values have no name", other.type_name()))),
        }
    }
}
