//! isEmpty() function - whether the current result holds nothing

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// isEmpty() function - whether the current result holds nothing
pub struct IsEmptyFunction;

impl XmlPathFunction for IsEmptyFunction {
    fn name(&self) -> &str {
        "isEmpty"
    }
    fn human_friendly_name(&self) -> &str {
        "Is Empty"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("isEmpty", TypeInfo::Boolean));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true when nothing matched, or when the current value is empty text or an empty list or map."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        let empty = match &context.input {
            XmlPathValue::String(text) => text.is_empty(),
            other => other.is_empty(),
        };
        Ok(XmlPathValue::Boolean(empty))
    }
}
