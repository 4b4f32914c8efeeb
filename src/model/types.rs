//! Conversion targets for query results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type information used as a dynamic conversion target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeInfo {
    /// Boolean value (true/false)
    Boolean,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// Single precision floating point
    Float,
    /// Double precision floating point
    Double,
    /// Arbitrary precision decimal
    Decimal,
    /// A single character
    Char,
    /// Text
    String,
    /// A single element
    Node,
    /// An ordered sequence of elements
    NodeCollection,
    /// Ordered list whose entries are converted to the element type
    List(Box<TypeInfo>),
    /// Key/value map whose entries are converted to the key and value types
    Map(Box<TypeInfo>, Box<TypeInfo>),
    /// No conversion
    Any,
}

impl TypeInfo {
    /// List of the given element type
    pub fn list_of(element: TypeInfo) -> Self {
        TypeInfo::List(Box::new(element))
    }

    /// Map of the given key and value types
    pub fn map_of(key: TypeInfo, value: TypeInfo) -> Self {
        TypeInfo::Map(Box::new(key), Box::new(value))
    }

    /// Whether the target holds exactly one scalar value
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            TypeInfo::Node
                | TypeInfo::NodeCollection
                | TypeInfo::List(_)
                | TypeInfo::Map(..)
                | TypeInfo::Any
        )
    }

    /// Inclusive bounds of the integer targets
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        match self {
            TypeInfo::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            TypeInfo::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            TypeInfo::Integer => Some((i32::MIN as i64, i32::MAX as i64)),
            TypeInfo::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::Boolean => write!(f, "boolean"),
            TypeInfo::Byte => write!(f, "byte"),
            TypeInfo::Short => write!(f, "short"),
            TypeInfo::Integer => write!(f, "int"),
            TypeInfo::Long => write!(f, "long"),
            TypeInfo::Float => write!(f, "float"),
            TypeInfo::Double => write!(f, "double"),
            TypeInfo::Decimal => write!(f, "decimal"),
            TypeInfo::Char => write!(f, "char"),
            TypeInfo::String => write!(f, "string"),
            TypeInfo::Node => write!(f, "node"),
            TypeInfo::NodeCollection => write!(f, "node collection"),
            TypeInfo::List(element) => write!(f, "list<{element}>"),
            TypeInfo::Map(key, value) => write!(f, "map<{key}, {value}>"),
            TypeInfo::Any => write!(f, "any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let ty = TypeInfo::map_of(TypeInfo::String, TypeInfo::list_of(TypeInfo::Integer));
        assert_eq!(ty.to_string(), "map<string, list<int>>");
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(TypeInfo::Byte.integer_bounds(), Some((-128, 127)));
        assert_eq!(TypeInfo::Double.integer_bounds(), None);
        assert!(TypeInfo::Char.is_scalar());
        assert!(!TypeInfo::NodeCollection.is_scalar());
    }
}
