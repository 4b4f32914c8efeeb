//! toBoolean() function - converts `true`/`false` text to a boolean

use crate::model::type_coercion::parse_boolean;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toBoolean() function - converts `true`/`false` text to a boolean
pub struct ToBooleanFunction;

impl XmlPathFunction for ToBooleanFunction {
    fn name(&self) -> &str {
        "toBoolean"
    }
    fn human_friendly_name(&self) -> &str {
        "To Boolean"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toBoolean", TypeInfo::Boolean));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true or false for the text `true` or `false`, ignoring case and surrounding whitespace. Other text is an error."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        super::convert(
            self.name(),
            "boolean",
            &context.input,
            parse_boolean,
            XmlPathValue::Boolean,
        )
    }
}
