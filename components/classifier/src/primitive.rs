//! Primitive classifier.

use host_value::Value;

use crate::tag::BuiltinType;

/// Classify the seven primitive kinds; `None` for objects and functions.
///
/// The nullish literals are recognized first, ahead of the `typeof`
/// discriminator, since `typeof null` reports `"object"`.
///
/// # Examples
///
/// ```
/// use classifier::{classify_primitive, BuiltinType};
/// use host_value::Value;
///
/// assert_eq!(classify_primitive(&Value::Null), Some(BuiltinType::Null));
/// assert_eq!(classify_primitive(&Value::from(1.5)), Some(BuiltinType::Number));
/// ```
pub fn classify_primitive(value: &Value) -> Option<BuiltinType> {
    match value {
        Value::Undefined => return Some(BuiltinType::Undefined),
        Value::Null => return Some(BuiltinType::Null),
        _ => {}
    }
    match value.type_of() {
        "boolean" => Some(BuiltinType::Boolean),
        "number" => Some(BuiltinType::Number),
        "string" => Some(BuiltinType::String),
        "symbol" => Some(BuiltinType::Symbol),
        "bigint" => Some(BuiltinType::BigInt),
        _ => None,
    }
}
