//! toFloat() function - converts value to a decimal number

use crate::model::type_coercion::parse_decimal;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toFloat() function - converts value to a decimal number
pub struct ToFloatFunction;

impl XmlPathFunction for ToFloatFunction {
    fn name(&self) -> &str {
        "toFloat"
    }
    fn human_friendly_name(&self) -> &str {
        "To Float"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toFloat", TypeInfo::Float));
        &SIG
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        super::convert(
            self.name(),
            "float",
            &context.input,
            parse_decimal,
            XmlPathValue::Decimal,
        )
    }
}
