//! Reflective helpers that never fail.
//!
//! Every heuristic in the pipeline reads the host through these helpers: a
//! host exception (hostile getter, revoked proxy) means "no information".

use host_value::{Object, PropertyKey, Value};

/// `obj[key]`, or `None` if the read throws
pub fn get(object: &Object, key: impl Into<PropertyKey>) -> Option<Value> {
    object.get(key).ok()
}

/// `key in obj`, or `false` if the check throws
pub fn has(object: &Object, key: impl Into<PropertyKey>) -> bool {
    object.has_property(key).unwrap_or(false)
}

/// `typeof obj[key] === "function"`
pub fn has_callable(object: &Object, key: impl Into<PropertyKey>) -> bool {
    get(object, key).is_some_and(|member| member.is_callable())
}

/// `obj.constructor` when it is an object
pub fn constructor_of(object: &Object) -> Option<Object> {
    match get(object, "constructor")? {
        Value::Object(constructor) => Some(constructor),
        _ => None,
    }
}

/// `value.constructor.name` when it is a non-empty string
///
/// # Examples
///
/// ```
/// use classifier::reflect::constructor_name;
/// use host_value::{Realm, Value};
///
/// let realm = Realm::new();
/// let date = Value::from(realm.new_date(0.0));
/// assert_eq!(constructor_name(&date).as_deref(), Some("Date"));
/// assert_eq!(constructor_name(&Value::Null), None);
/// ```
pub fn constructor_name(value: &Value) -> Option<String> {
    let constructor = constructor_of(value.as_object()?)?;
    function_name(&constructor)
}

/// `fn.name` when it is a non-empty string
pub fn function_name(function: &Object) -> Option<String> {
    match get(function, "name")? {
        Value::String(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Constructor name of the value's prototype: `Object.getPrototypeOf(v).constructor.name`
pub fn prototype_constructor_name(value: &Value) -> Option<String> {
    let prototype = value.as_object()?.prototype_of().ok()??;
    constructor_name(&Value::Object(prototype))
}
