//! toLong() function - converts value to a 64-bit integer

use crate::model::type_coercion::parse_integer;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toLong() function - converts value to a 64-bit integer
pub struct ToLongFunction;

impl XmlPathFunction for ToLongFunction {
    fn name(&self) -> &str {
        "toLong"
    }
    fn human_friendly_name(&self) -> &str {
        "To Long"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toLong", TypeInfo::Long));
        &SIG
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        super::convert(
            self.name(),
            "long",
            &context.input,
            |value, target| parse_integer(value, target, i64::MIN, i64::MAX),
            XmlPathValue::Integer,
        )
    }
}
