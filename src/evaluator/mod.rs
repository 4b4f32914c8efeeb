//! Path evaluator
//!
//! Walks a document tree following the steps of a compiled
//! [`PathExpression`](crate::ast::PathExpression). Zero-argument functions are
//! resolved through a [`FunctionRegistry`](crate::registry::FunctionRegistry);
//! closure functions (`find`, `findAll`, `collectEntries`) and child filters
//! are evaluated here.

mod engine;
mod error;
mod predicate;

pub use engine::PathEvaluator;
pub use error::{EvaluationError, EvaluationResult};
