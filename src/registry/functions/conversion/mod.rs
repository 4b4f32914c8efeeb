//! Conversion functions applied to a single matched value

mod to_boolean;
mod to_decimal;
mod to_double;
mod to_float;
mod to_integer;
mod to_long;
mod to_string;

pub use to_boolean::ToBooleanFunction;
pub use to_decimal::ToBigDecimalFunction;
pub use to_double::ToDoubleFunction;
pub use to_float::ToFloatFunction;
pub use to_integer::ToIntegerFunction;
pub use to_long::ToLongFunction;
pub use to_string::ToStringFunction;

use crate::model::{CoercionError, CoercionResult, XmlPathValue};
use crate::registry::function::{FunctionError, FunctionRegistry, FunctionResult};

/// Convert the input with `parse`; an absent input stays absent
fn convert<T>(
    name: &str,
    target: &str,
    input: &XmlPathValue,
    parse: impl FnOnce(XmlPathValue, &str) -> CoercionResult<T>,
    wrap: impl FnOnce(T) -> XmlPathValue,
) -> FunctionResult<XmlPathValue> {
    if matches!(input, XmlPathValue::Empty) {
        return Ok(XmlPathValue::Empty);
    }
    parse(input.clone(), target)
        .map(wrap)
        .map_err(|error| conversion_failed(name, target, input, error))
}

fn conversion_failed(
    name: &str,
    target: &str,
    input: &XmlPathValue,
    error: CoercionError,
) -> FunctionError {
    log::trace!("{name}() failed: {error}");
    let value = match error {
        CoercionError::MultipleItems { count, .. } => format!("{count} values"),
        _ => input.to_text().unwrap_or_default(),
    };
    FunctionError::ConversionFailed {
        name: name.to_string(),
        value,
        target: target.to_string(),
    }
}

/// Register all conversion functions
pub fn register_conversion_functions(registry: &mut FunctionRegistry) {
    registry.register(ToIntegerFunction);
    registry.register_alias("toInt", "toInteger");
    registry.register(ToLongFunction);
    registry.register(ToFloatFunction);
    registry.register(ToDoubleFunction);
    registry.register(ToBigDecimalFunction);
    registry.register(ToBooleanFunction);
    registry.register(ToStringFunction);
}
