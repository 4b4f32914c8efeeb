//! toDouble() function - converts value to a decimal number

use crate::model::type_coercion::parse_decimal;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toDouble() function - converts value to a decimal number
pub struct ToDoubleFunction;

impl XmlPathFunction for ToDoubleFunction {
    fn name(&self) -> &str {
        "toDouble"
    }
    fn human_friendly_name(&self) -> &str {
        "To Double"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toDouble", TypeInfo::Double));
        &SIG
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        super::convert(
            self.name(),
            "double",
            &context.input,
            parse_decimal,
            XmlPathValue::Decimal,
        )
    }
}
