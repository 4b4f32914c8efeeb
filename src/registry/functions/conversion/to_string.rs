//! toString() function - text form of the current value

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toString() function - text form of the current value
pub struct ToStringFunction;

impl XmlPathFunction for ToStringFunction {
    fn name(&self) -> &str {
        "toString"
    }
    fn human_friendly_name(&self) -> &str {
        "To String"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toString", TypeInfo::String));
        &SIG
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        Ok(match &context.input {
            XmlPathValue::Empty => XmlPathValue::Empty,
            XmlPathValue::String(_) => context.input.clone(),
            other => XmlPathValue::String(other.to_string()),
        })
    }
}
