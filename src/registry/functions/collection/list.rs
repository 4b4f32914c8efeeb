//! list() function - text of each member as a list

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// list() function - text of each member as a list
pub struct ListFunction;

impl XmlPathFunction for ListFunction {
    fn name(&self) -> &str {
        "list"
    }
    fn human_friendly_name(&self) -> &str {
        "List"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("list", TypeInfo::list_of(TypeInfo::String))
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the ordered list of each member's text content. Lists are returned unchanged."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        let entries = match &context.input {
            XmlPathValue::List(_) => return Ok(context.input.clone()),
            XmlPathValue::Map(_) => vec![context.input.clone()],
            other => other
                .members()
                .into_iter()
                .map(|member| match member {
                    XmlPathValue::Node(node) => XmlPathValue::String(node.full_text()),
                    scalar => scalar,
                })
                .collect(),
        };
        Ok(XmlPathValue::list(entries))
    }
}
