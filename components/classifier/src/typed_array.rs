//! Typed-array sub-classifier.

use host_value::{TypedArrayKind, Value};

use crate::reflect;
use crate::tag::BuiltinType;

/// Upper bound on the prototype walk; guards against proxy cycles.
const MAX_DEPTH: usize = 64;

/// Classify the eleven typed array kinds by constructor name.
///
/// The value must be an array-buffer view and not a DataView. The name is
/// read from the prototype chain rather than the instance, walking up past
/// user subclasses until a typed array constructor is found.
///
/// # Examples
///
/// ```
/// use classifier::{classify_typed_array, BuiltinType};
/// use host_value::{Realm, TypedArrayKind, Value};
///
/// let realm = Realm::new();
/// let ints = realm.new_typed_array(TypedArrayKind::Int32, 4);
/// assert_eq!(classify_typed_array(&Value::from(ints)), Some(BuiltinType::Int32Array));
///
/// let view = realm.new_data_view(&realm.new_array_buffer(8)).unwrap();
/// assert_eq!(classify_typed_array(&Value::from(view)), None);
/// ```
pub fn classify_typed_array(value: &Value) -> Option<BuiltinType> {
    let object = value.as_object()?;
    if !object.is_array_buffer_view() || object.is_data_view() {
        return None;
    }

    let mut cursor = object.prototype_of().ok().flatten();
    for _ in 0..MAX_DEPTH {
        let prototype = cursor?;
        let name = reflect::constructor_of(&prototype)
            .as_ref()
            .and_then(reflect::function_name);
        if let Some(builtin) = name.as_deref().and_then(typed_array_type) {
            return Some(builtin);
        }
        cursor = prototype.prototype_of().ok().flatten();
    }
    None
}

/// Map a typed array constructor name to its tag
pub fn typed_array_type(constructor_name: &str) -> Option<BuiltinType> {
    let kind = TypedArrayKind::ALL
        .into_iter()
        .find(|kind| kind.name() == constructor_name)?;
    Some(match kind {
        TypedArrayKind::Int8 => BuiltinType::Int8Array,
        TypedArrayKind::Uint8 => BuiltinType::Uint8Array,
        TypedArrayKind::Uint8Clamped => BuiltinType::Uint8ClampedArray,
        TypedArrayKind::Int16 => BuiltinType::Int16Array,
        TypedArrayKind::Uint16 => BuiltinType::Uint16Array,
        TypedArrayKind::Int32 => BuiltinType::Int32Array,
        TypedArrayKind::Uint32 => BuiltinType::Uint32Array,
        TypedArrayKind::Float32 => BuiltinType::Float32Array,
        TypedArrayKind::Float64 => BuiltinType::Float64Array,
        TypedArrayKind::BigInt64 => BuiltinType::BigInt64Array,
        TypedArrayKind::BigUint64 => BuiltinType::BigUint64Array,
    })
}
