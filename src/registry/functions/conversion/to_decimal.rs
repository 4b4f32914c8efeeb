//! toBigDecimal() function - converts value to a decimal number

use crate::model::type_coercion::parse_decimal;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toBigDecimal() function - converts value to a decimal number
pub struct ToBigDecimalFunction;

impl XmlPathFunction for ToBigDecimalFunction {
    fn name(&self) -> &str {
        "toBigDecimal"
    }
    fn human_friendly_name(&self) -> &str {
        "To Big Decimal"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toBigDecimal", TypeInfo::Decimal));
        &SIG
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        super::convert(
            self.name(),
            "decimal",
            &context.input,
            parse_decimal,
            XmlPathValue::Decimal,
        )
    }
}
