//! Function signatures

use crate::model::TypeInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Function signature: name and result type
///
/// Path functions take no arguments, so the signature only records what
/// the function returns. `TypeInfo::Any` marks functions whose result
/// shape follows their input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Return type
    pub return_type: TypeInfo,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(name: impl Into<String>, return_type: TypeInfo) -> Self {
        Self {
            name: name.into(),
            return_type,
        }
    }

    /// Whether the result is a single scalar
    pub fn returns_scalar(&self) -> bool {
        self.return_type.is_scalar()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(): {}", self.name, self.return_type)
    }
}
