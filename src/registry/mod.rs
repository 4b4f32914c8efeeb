//! Function registry for path expressions
//!
//! Zero-argument functions such as `size()` or `toInt()` are looked up by
//! name at evaluation time. Callers may build their own registry, starting
//! from [`create_standard_registry`], and attach it to an `XmlPath`.

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{
    EvaluationContext, FunctionError, FunctionRegistry, FunctionResult, XmlPathFunction,
};
pub use signature::FunctionSignature;

/// Create a registry with all built-in functions
pub fn create_standard_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    functions::register_builtin_functions(&mut registry);
    registry
}
