//! text() function - text content of the current result

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// text() function - text content of the current result
pub struct TextFunction;

impl XmlPathFunction for TextFunction {
    fn name(&self) -> &str {
        "text"
    }
    fn human_friendly_name(&self) -> &str {
        "Text"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("text", TypeInfo::String));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the text content of the current node, or the concatenated text of every node in the current collection. Returns empty text when nothing matched."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        Ok(XmlPathValue::String(
            context.input.to_text().unwrap_or_default(),
        ))
    }
}
