//! Conversion of path results into caller-requested types
//!
//! Both the static [`FromXmlPathValue`] impls and the dynamic
//! [`TypeCoercion::coerce_to_type`] route through the same parser table
//! below, so a given target behaves identically either way.

use super::collection::NodeCollection;
use super::element::Node;
use super::types::TypeInfo;
use super::value::{PathMap, XmlPathValue, parse_decimal_text};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Result type for type coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Errors that can occur during type coercion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// Cannot coerce between the specified types
    #[error("cannot convert {from} to {to}")]
    IncompatibleTypes {
        /// Source value type
        from: String,
        /// Requested type
        to: String,
    },

    /// The value format is invalid for the target type
    #[error("invalid format '{value}' for type {target_type}")]
    InvalidFormat {
        /// Offending text
        value: String,
        /// Requested type
        target_type: String,
    },

    /// Several values where exactly one is needed
    #[error("cannot convert {count} values to a single {target_type}")]
    MultipleItems {
        /// Number of values found
        count: usize,
        /// Requested type
        target_type: String,
    },

    /// Absent value where one is needed
    #[error("no value to convert to {target_type}")]
    EmptyValue {
        /// Requested type
        target_type: String,
    },

    /// Numeric value outside the target's range
    #[error("value {value} is out of range for type {target_type}")]
    OutOfRange {
        /// Offending value
        value: String,
        /// Requested type
        target_type: String,
    },
}

/// Static conversion from a path result
pub trait FromXmlPathValue: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    /// Convert the value, failing when its shape or text does not fit
    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self>;
}

/// Reduce a value to exactly one member
fn single(value: XmlPathValue, target: &str) -> CoercionResult<XmlPathValue> {
    match value {
        XmlPathValue::Empty => Err(CoercionError::EmptyValue {
            target_type: target.to_string(),
        }),
        XmlPathValue::Nodes(nodes) => match nodes.len() {
            0 => Err(CoercionError::EmptyValue {
                target_type: target.to_string(),
            }),
            1 => Ok(XmlPathValue::Node(nodes[0].clone())),
            count => Err(CoercionError::MultipleItems {
                count,
                target_type: target.to_string(),
            }),
        },
        XmlPathValue::List(items) => match items.len() {
            0 => Err(CoercionError::EmptyValue {
                target_type: target.to_string(),
            }),
            1 => single(items[0].clone(), target),
            count => Err(CoercionError::MultipleItems {
                count,
                target_type: target.to_string(),
            }),
        },
        other => Ok(other),
    }
}

/// Text of a single scalar-like value
fn scalar_text(value: XmlPathValue, target: &str) -> CoercionResult<String> {
    match single(value, target)? {
        XmlPathValue::Map(_) => Err(CoercionError::IncompatibleTypes {
            from: "Map".to_string(),
            to: target.to_string(),
        }),
        other => Ok(other.to_text().unwrap_or_default()),
    }
}

fn invalid_format(value: &str, target: &str) -> CoercionError {
    CoercionError::InvalidFormat {
        value: value.to_string(),
        target_type: target.to_string(),
    }
}

fn check_range(n: i64, min: i64, max: i64, target: &str) -> CoercionResult<i64> {
    if n < min || n > max {
        return Err(CoercionError::OutOfRange {
            value: n.to_string(),
            target_type: target.to_string(),
        });
    }
    Ok(n)
}

pub(crate) fn parse_integer(
    value: XmlPathValue,
    target: &str,
    min: i64,
    max: i64,
) -> CoercionResult<i64> {
    match single(value, target)? {
        XmlPathValue::Integer(n) => check_range(n, min, max, target),
        XmlPathValue::Decimal(d) => {
            let n = d
                .fract()
                .is_zero()
                .then(|| d.to_i64())
                .flatten()
                .ok_or_else(|| CoercionError::OutOfRange {
                    value: d.to_string(),
                    target_type: target.to_string(),
                })?;
            check_range(n, min, max, target)
        }
        XmlPathValue::Boolean(_) => Err(CoercionError::IncompatibleTypes {
            from: "Boolean".to_string(),
            to: target.to_string(),
        }),
        other => {
            let text = scalar_text(other, target)?;
            let trimmed = text.trim();
            let n = trimmed.parse::<i64>().map_err(|e| match e.kind() {
                std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                    CoercionError::OutOfRange {
                        value: trimmed.to_string(),
                        target_type: target.to_string(),
                    }
                }
                _ => invalid_format(&text, target),
            })?;
            check_range(n, min, max, target)
        }
    }
}

pub(crate) fn parse_float<T: FromStr>(value: XmlPathValue, target: &str) -> CoercionResult<T> {
    match single(value, target)? {
        XmlPathValue::Boolean(_) => Err(CoercionError::IncompatibleTypes {
            from: "Boolean".to_string(),
            to: target.to_string(),
        }),
        other => {
            let text = scalar_text(other, target)?;
            text.trim()
                .parse::<T>()
                .map_err(|_| invalid_format(&text, target))
        }
    }
}

pub(crate) fn parse_decimal(value: XmlPathValue, target: &str) -> CoercionResult<Decimal> {
    match single(value, target)? {
        XmlPathValue::Integer(n) => Ok(Decimal::from(n)),
        XmlPathValue::Decimal(d) => Ok(d),
        XmlPathValue::Boolean(_) => Err(CoercionError::IncompatibleTypes {
            from: "Boolean".to_string(),
            to: target.to_string(),
        }),
        other => {
            let text = scalar_text(other, target)?;
            parse_decimal_text(&text).ok_or_else(|| invalid_format(&text, target))
        }
    }
}

pub(crate) fn parse_boolean(value: XmlPathValue, target: &str) -> CoercionResult<bool> {
    match single(value, target)? {
        XmlPathValue::Boolean(b) => Ok(b),
        XmlPathValue::Integer(_) | XmlPathValue::Decimal(_) => {
            Err(CoercionError::IncompatibleTypes {
                from: "number".to_string(),
                to: target.to_string(),
            })
        }
        other => {
            let text = scalar_text(other, target)?;
            match text.trim() {
                t if t.eq_ignore_ascii_case("true") => Ok(true),
                t if t.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(invalid_format(&text, target)),
            }
        }
    }
}

pub(crate) fn parse_char(value: XmlPathValue, target: &str) -> CoercionResult<char> {
    let text = scalar_text(value, target)?;
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }
    let mut trimmed = text.trim().chars();
    match (trimmed.next(), trimmed.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid_format(&text, target)),
    }
}

pub(crate) fn parse_string(value: XmlPathValue, target: &str) -> CoercionResult<String> {
    scalar_text(value, target)
}

pub(crate) fn parse_node(value: XmlPathValue, target: &str) -> CoercionResult<Node> {
    match single(value, target)? {
        XmlPathValue::Node(node) => Ok(node),
        other => Err(CoercionError::IncompatibleTypes {
            from: other.type_name().to_string(),
            to: target.to_string(),
        }),
    }
}

pub(crate) fn parse_node_collection(
    value: XmlPathValue,
    target: &str,
) -> CoercionResult<NodeCollection> {
    match value {
        XmlPathValue::Nodes(nodes) => Ok(nodes),
        XmlPathValue::Node(node) => Ok(NodeCollection::from_single(node)),
        XmlPathValue::Empty => Ok(NodeCollection::empty()),
        other => Err(CoercionError::IncompatibleTypes {
            from: other.type_name().to_string(),
            to: target.to_string(),
        }),
    }
}

macro_rules! impl_integer_target {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromXmlPathValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
                    let n = parse_integer(value, $name, <$ty>::MIN as i64, <$ty>::MAX as i64)?;
                    // in range after the check above
                    Ok(n as $ty)
                }
            }
        )*
    };
}

impl_integer_target!(i8 => "byte", i16 => "short", i32 => "int", i64 => "long");

impl FromXmlPathValue for f32 {
    const TYPE_NAME: &'static str = "float";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_float(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_float(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_decimal(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_boolean(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for char {
    const TYPE_NAME: &'static str = "char";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_char(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_string(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for Node {
    const TYPE_NAME: &'static str = "node";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_node(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for NodeCollection {
    const TYPE_NAME: &'static str = "node collection";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        parse_node_collection(value, Self::TYPE_NAME)
    }
}

impl FromXmlPathValue for Arc<PathMap> {
    const TYPE_NAME: &'static str = "map";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        match value {
            XmlPathValue::Map(map) => Ok(map),
            XmlPathValue::Empty => Err(CoercionError::EmptyValue {
                target_type: Self::TYPE_NAME.to_string(),
            }),
            other => Err(CoercionError::IncompatibleTypes {
                from: other.type_name().to_string(),
                to: Self::TYPE_NAME.to_string(),
            }),
        }
    }
}

impl FromXmlPathValue for XmlPathValue {
    const TYPE_NAME: &'static str = "any";

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        Ok(value)
    }
}

impl<T: FromXmlPathValue> FromXmlPathValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_path_value(value: XmlPathValue) -> CoercionResult<Self> {
        match value {
            XmlPathValue::Empty => Ok(None),
            other => T::from_path_value(other).map(Some),
        }
    }
}

/// Type coercion utility for path results
pub struct TypeCoercion;

impl TypeCoercion {
    /// Attempt to coerce a value to the specified type
    pub fn coerce_to_type(
        value: XmlPathValue,
        target_type: &TypeInfo,
    ) -> CoercionResult<XmlPathValue> {
        let name = target_type.to_string();
        match target_type {
            TypeInfo::Any => Ok(value),
            TypeInfo::Boolean => parse_boolean(value, &name).map(XmlPathValue::Boolean),
            TypeInfo::Byte | TypeInfo::Short | TypeInfo::Integer | TypeInfo::Long => {
                let (min, max) = target_type
                    .integer_bounds()
                    .unwrap_or((i64::MIN, i64::MAX));
                parse_integer(value, &name, min, max).map(XmlPathValue::Integer)
            }
            TypeInfo::Float | TypeInfo::Double | TypeInfo::Decimal => {
                parse_decimal(value, &name).map(XmlPathValue::Decimal)
            }
            TypeInfo::Char => parse_char(value, &name).map(|c| XmlPathValue::String(c.to_string())),
            TypeInfo::String => parse_string(value, &name).map(XmlPathValue::String),
            TypeInfo::Node => parse_node(value, &name).map(XmlPathValue::Node),
            TypeInfo::NodeCollection => {
                parse_node_collection(value, &name).map(XmlPathValue::Nodes)
            }
            TypeInfo::List(element) => Self::coerce_to_list(value, element),
            TypeInfo::Map(key, entry) => Self::coerce_to_map(value, key, entry),
        }
    }

    /// Check whether a value converts to the target type
    pub fn can_coerce_to_type(value: &XmlPathValue, target_type: &TypeInfo) -> bool {
        Self::coerce_to_type(value.clone(), target_type).is_ok()
    }

    fn coerce_to_list(value: XmlPathValue, element: &TypeInfo) -> CoercionResult<XmlPathValue> {
        let items = value
            .members()
            .into_iter()
            .map(|member| match (element, member) {
                (TypeInfo::Any, XmlPathValue::Node(node)) => {
                    Ok(XmlPathValue::String(node.full_text()))
                }
                (element, member) => Self::coerce_to_type(member, element),
            })
            .collect::<CoercionResult<Vec<_>>>()?;
        Ok(XmlPathValue::list(items))
    }

    fn coerce_to_map(
        value: XmlPathValue,
        key_type: &TypeInfo,
        value_type: &TypeInfo,
    ) -> CoercionResult<XmlPathValue> {
        let source = Arc::<PathMap>::from_path_value(value)?;
        let mut map = PathMap::with_capacity(source.len());
        for (key, entry) in source.iter() {
            let key = match key {
                Some(key) => {
                    Self::coerce_to_type(XmlPathValue::String(key.clone()), key_type)?.to_text()
                }
                None => None,
            };
            let entry = match entry {
                XmlPathValue::Empty => XmlPathValue::Empty,
                other => Self::coerce_to_type(other.clone(), value_type)?,
            };
            map.insert(key, entry);
        }
        Ok(XmlPathValue::Map(Arc::new(map)))
    }

    /// Text of every member; a single value becomes a one-entry list and an
    /// absent value an empty one
    pub fn to_text_list(value: XmlPathValue) -> CoercionResult<Arc<[String]>> {
        if let XmlPathValue::Map(_) = value {
            return Err(CoercionError::IncompatibleTypes {
                from: "Map".to_string(),
                to: "list".to_string(),
            });
        }
        let texts = value
            .members()
            .into_iter()
            .map(|member| parse_string(member, String::TYPE_NAME))
            .collect::<CoercionResult<Vec<_>>>()?;
        Ok(Arc::from(texts))
    }

    /// Members converted element-wise
    pub fn to_list<T: FromXmlPathValue>(value: XmlPathValue) -> CoercionResult<Arc<[T]>> {
        if let XmlPathValue::Map(_) = value {
            return Err(CoercionError::IncompatibleTypes {
                from: "Map".to_string(),
                to: format!("list<{}>", T::TYPE_NAME),
            });
        }
        let items = value
            .members()
            .into_iter()
            .map(T::from_path_value)
            .collect::<CoercionResult<Vec<_>>>()?;
        Ok(Arc::from(items))
    }

    /// Map entries converted key-wise and value-wise; null keys and values stay null
    pub fn to_map<K, V>(value: XmlPathValue) -> CoercionResult<Arc<IndexMap<Option<K>, Option<V>>>>
    where
        K: FromXmlPathValue + Hash + Eq,
        V: FromXmlPathValue,
    {
        let source = Arc::<PathMap>::from_path_value(value)?;
        let map = source
            .iter()
            .map(|(key, entry)| {
                let key = key
                    .as_ref()
                    .map(|k| K::from_path_value(XmlPathValue::String(k.clone())))
                    .transpose()?;
                let entry = match entry {
                    XmlPathValue::Empty => None,
                    other => Some(V::from_path_value(other.clone())?),
                };
                Ok((key, entry))
            })
            .collect::<CoercionResult<IndexMap<_, _>>>()?;
        Ok(Arc::new(map))
    }
}
