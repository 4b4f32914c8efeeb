//! Abstract Syntax Tree (AST) definitions for path expressions
//!
//! A path compiles to a [`PathExpression`], a flat list of [`Step`]s.
//! Closure bodies (`find { ... }`) compile to [`Expression`] trees whose
//! fields are themselves relative paths.

mod expression;
mod operator;
mod step;

pub use expression::*;
pub use operator::*;
pub use step::*;
