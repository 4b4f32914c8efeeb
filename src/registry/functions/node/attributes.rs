//! attributes() function - attribute map of the current node

use crate::model::{PathMap, TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;
use std::sync::Arc;

/// attributes() function - attribute map of the current node
pub struct AttributesFunction;

impl XmlPathFunction for AttributesFunction {
    fn name(&self) -> &str {
        "attributes"
    }
    fn human_friendly_name(&self) -> &str {
        "Attributes"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "attributes",
                TypeInfo::map_of(TypeInfo::String, TypeInfo::String),
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the attributes of the current node as a map from name to value, in document order."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        match &context.input {
            XmlPathValue::Empty => Ok(XmlPathValue::Empty),
            XmlPathValue::Node(node) => {
                let map: PathMap = node
                    .attributes()
                    .iter()
                    .map(|(name, value)| (Some(name.clone()), XmlPathValue::string(value.as_str())))
                    .collect();
                Ok(XmlPathValue::Map(Arc::new(map)))
            }
            other => Err(self.invalid_input(format!(
                "expected a single node, got {}",
                other.type_name()
            ))),
        }
    }
}
