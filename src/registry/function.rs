//! Function trait, evaluation context and registry

use crate::model::XmlPathValue;
use crate::registry::signature::FunctionSignature;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// The function cannot be applied to its input
    #[error("Function '{name}' cannot be applied here: {message}")]
    InvalidInput {
        /// Function name
        name: String,
        /// What was wrong with the input
        message: String,
    },

    /// A conversion function could not convert its input
    #[error("Function '{name}' cannot convert '{value}' to {target}")]
    ConversionFailed {
        /// Function name
        name: String,
        /// Text of the offending value
        value: String,
        /// Conversion target
        target: String,
    },
}

/// Context for function evaluation
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    /// Current input value
    pub input: XmlPathValue,
}

impl EvaluationContext {
    /// Create a new evaluation context
    pub fn new(input: XmlPathValue) -> Self {
        Self { input }
    }
}

/// A zero-argument function applied to the current result (`size()`, `text()`, ...)
pub trait XmlPathFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the human-friendly name for the function
    fn human_friendly_name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function against the context input
    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Check if this function is pure (deterministic with no side effects)
    fn is_pure(&self) -> bool {
        true
    }

    /// Error for an input the function does not accept
    fn invalid_input(&self, message: impl Into<String>) -> FunctionError
    where
        Self: Sized,
    {
        FunctionError::InvalidInput {
            name: self.name().to_string(),
            message: message.into(),
        }
    }
}

/// Registry of functions by name
///
/// Cloning is cheap; function implementations are shared.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn XmlPathFunction>>,
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.function_names();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its own name, replacing any previous one
    pub fn register<F: XmlPathFunction + 'static>(&mut self, function: F) {
        let name = function.name().to_string();
        if self.functions.insert(name.clone(), Arc::new(function)).is_some() {
            log::debug!("Replaced function '{name}'");
        }
    }

    /// Make `alias` resolve to the already registered function `target`
    ///
    /// Returns false when `target` is not registered.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.functions.get(target).cloned() {
            Some(function) => {
                self.functions.insert(alias.into(), function);
                true
            }
            None => false,
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn XmlPathFunction>> {
        self.functions.get(name).cloned()
    }

    /// Check if a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names of all registered functions and aliases
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Evaluate a registered function, `None` when the name is unknown
    pub fn evaluate(
        &self,
        name: &str,
        context: &EvaluationContext,
    ) -> Option<FunctionResult<XmlPathValue>> {
        let function = self.functions.get(name)?;
        Some(function.evaluate(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeInfo;
    use std::sync::LazyLock;

    struct AnswerFunction;

    impl XmlPathFunction for AnswerFunction {
        fn name(&self) -> &str {
            "answer"
        }
        fn human_friendly_name(&self) -> &str {
            "Answer"
        }
        fn signature(&self) -> &FunctionSignature {
            static SIG: LazyLock<FunctionSignature> =
                LazyLock::new(|| FunctionSignature::new("answer", TypeInfo::Long));
            &SIG
        }
        fn evaluate(&self, _context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
            Ok(XmlPathValue::Integer(42))
        }
    }

    #[test]
    fn test_register_and_evaluate() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        registry.register(AnswerFunction);

        let context = EvaluationContext::new(XmlPathValue::Empty);
        assert_eq!(
            registry.evaluate("answer", &context),
            Some(Ok(XmlPathValue::Integer(42)))
        );
        assert!(registry.evaluate("question", &context).is_none());
    }

    #[test]
    fn test_alias() {
        let mut registry = FunctionRegistry::new();
        registry.register(AnswerFunction);
        assert!(registry.register_alias("theAnswer", "answer"));
        assert!(!registry.register_alias("other", "missing"));
        assert!(registry.contains("theAnswer"));
        assert_eq!(registry.len(), 2);
    }
}
