//! size() function - returns the number of matched members

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// size() function - returns the number of matched members
pub struct SizeFunction;

impl XmlPathFunction for SizeFunction {
    fn name(&self) -> &str {
        "size"
    }
    fn human_friendly_name(&self) -> &str {
        "Size"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("size", TypeInfo::Integer));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the number of members of the current result: 0 when nothing matched, 1 for a single node or value, the member count for collections, lists and maps."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        Ok(XmlPathValue::Integer(context.input.len() as i64))
    }
}
