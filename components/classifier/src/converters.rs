//! Type coercion driven by classification.
//!
//! Every converter classifies its input first and dispatches on the tag, so
//! a value is converted the way its kind says rather than by `typeof`.
//! Boxed primitives are unwrapped before the primitive converters run.
//! Complex results are allocated in the classifier's home realm.
//!
//! Converters that read user properties (array-likes, plain objects, error
//! messages) propagate host exceptions as [`HostResult`]; the rest never fail.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use host_value::{HostError, HostResult, Object, ObjectClass, PropertyKey, Symbol, TypedArrayKind, Value};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::classifier::Classifier;
use crate::internal_tag::read_host_tag;
use crate::reflect;
use crate::tag::BuiltinType;

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Largest magnitude of a Date time value, in milliseconds
const MAX_TIME_VALUE: f64 = 8.64e15;

/// Longest array an array-like may be expanded into
const MAX_ARRAY_LENGTH: f64 = 4_294_967_295.0;

static DECIMAL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());
static INTEGER_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

fn builtin_of(classifier: &Classifier, value: &Value) -> Option<BuiltinType> {
    classifier.classify(value).builtin()
}

/// The primitive inside a boxed primitive, or the value itself
fn unboxed(value: &Value) -> Value {
    if let Value::Object(object) = value {
        match object.class() {
            ObjectClass::Boolean(b) => return Value::Boolean(*b),
            ObjectClass::Number(n) => return Value::Number(*n),
            ObjectClass::String(s) => return Value::String(s.clone()),
            ObjectClass::Symbol(s) => return Value::Symbol(s.clone()),
            ObjectClass::BigInt(n) => return Value::BigInt(n.clone()),
            _ => {}
        }
    }
    value.clone()
}

/// Render any value as a string.
///
/// Dates render as ISO 8601, regexps as `/source/flags`, functions as their
/// source text, arrays and plain objects as JSON (falling back to the class
/// string when JSON rendering throws, e.g. on a cycle).
///
/// # Examples
///
/// ```
/// use classifier::{converters, Classifier};
/// use host_value::{Realm, Value};
///
/// let realm = Realm::new();
/// let classifier = Classifier::new(&realm);
///
/// let list = realm.new_array(vec![Value::from(1), Value::from("a"), Value::Null]);
/// assert_eq!(converters::to_string(&classifier, &list.into()), r#"[1,"a",null]"#);
/// assert_eq!(
///     converters::to_string(&classifier, &realm.new_date(0.0).into()),
///     "1970-01-01T00:00:00.000Z"
/// );
/// ```
pub fn to_string(classifier: &Classifier, value: &Value) -> String {
    let value = unboxed(value);
    let Value::Object(object) = &value else {
        return string_of(&value);
    };
    match builtin_of(classifier, &value) {
        Some(BuiltinType::Date) => object
            .time_value()
            .and_then(iso_string)
            .unwrap_or_else(|| "Invalid Date".to_string()),
        Some(BuiltinType::RegExp) => regexp_string(object),
        Some(
            BuiltinType::Function
            | BuiltinType::AsyncFunction
            | BuiltinType::GeneratorFunction
            | BuiltinType::AsyncGeneratorFunction,
        ) => function_string(object),
        Some(BuiltinType::Array | BuiltinType::Object) => match json_string(&value) {
            Ok(json) => json,
            Err(error) => {
                trace!(%error, "JSON rendering failed, using class string");
                read_host_tag(object)
            }
        },
        _ => string_of(&value),
    }
}

/// Convert to a number; `None` where the conversion is meaningless.
///
/// Strings follow numeric literal syntax (blank is `0`, hex/octal/binary
/// prefixes are honoured); BigInts outside the safe integer range and
/// unparsable strings yield `None`.
pub fn to_number(classifier: &Classifier, value: &Value) -> Option<f64> {
    let value = unboxed(value);
    match (builtin_of(classifier, &value)?, &value) {
        (BuiltinType::Number, Value::Number(n)) => Some(*n),
        (BuiltinType::String, Value::String(text)) => parse_number(text),
        (BuiltinType::Boolean, Value::Boolean(b)) => Some(if *b { 1.0 } else { 0.0 }),
        (BuiltinType::Null, _) => Some(0.0),
        (BuiltinType::BigInt, Value::BigInt(n)) => n
            .to_f64()
            .filter(|n| n.abs() <= MAX_SAFE_INTEGER),
        (BuiltinType::Date, Value::Object(date)) => date.time_value(),
        _ => None,
    }
}

/// Convert to a boolean.
///
/// Strings are false when blank or one of `false`, `0`, `no`, `null`,
/// `undefined` (case-insensitive); arrays and plain objects are false when
/// empty; everything else follows truthiness.
pub fn to_boolean(classifier: &Classifier, value: &Value) -> bool {
    let value = unboxed(value);
    match (builtin_of(classifier, &value), &value) {
        (Some(BuiltinType::String), Value::String(text)) => !matches!(
            text.to_lowercase().as_str(),
            "" | "false" | "0" | "no" | "null" | "undefined"
        ),
        (Some(BuiltinType::Array), Value::Object(array)) => {
            array.elements().is_some_and(|elements| !elements.is_empty())
        }
        (Some(BuiltinType::Object), Value::Object(object)) => !own_string_keys(object).is_empty(),
        _ => value.is_truthy(),
    }
}

/// Convert to a BigInt; `None` for fractions, non-finite numbers and
/// strings that are not integer literals
pub fn to_bigint(classifier: &Classifier, value: &Value) -> Option<BigInt> {
    let value = unboxed(value);
    match (builtin_of(classifier, &value)?, &value) {
        (BuiltinType::BigInt, Value::BigInt(n)) => Some(n.clone()),
        (BuiltinType::Number, Value::Number(n)) if n.fract() == 0.0 => BigInt::from_f64(*n),
        (BuiltinType::String, Value::String(text)) => parse_bigint(text),
        (BuiltinType::Boolean, Value::Boolean(b)) => Some(BigInt::from(u8::from(*b))),
        _ => None,
    }
}

/// Convert to a symbol: symbols pass through, anything else becomes a fresh
/// symbol described by its string form
pub fn to_symbol(classifier: &Classifier, value: &Value) -> Symbol {
    match unboxed(value) {
        Value::Symbol(symbol) => symbol,
        Value::String(text) => Symbol::new(Some(&text)),
        other => Symbol::new(Some(&to_string(classifier, &other))),
    }
}

/// Convert to an array.
///
/// Arrays pass through unchanged. Strings split into characters, sets into
/// their values, maps into `[key, value]` pairs; nullish values give `[]`,
/// array-likes are expanded by `length`, anything else is wrapped.
pub fn to_array(classifier: &Classifier, value: &Value) -> HostResult<Object> {
    let realm = classifier.realm();
    let elements = match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Array), Value::Object(array)) => return Ok(array.clone()),
        (Some(BuiltinType::String), Value::String(text)) => characters(text),
        (Some(BuiltinType::Set), Value::Object(set)) => set.set_values().unwrap_or_default(),
        (Some(BuiltinType::Map), Value::Object(map)) => map
            .map_entries()
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| Value::from(realm.new_array(vec![key, value])))
            .collect(),
        (Some(BuiltinType::Null | BuiltinType::Undefined), _) => Vec::new(),
        (_, Value::Object(object)) if is_array_like(object)? => array_like(object)?,
        _ => vec![value.clone()],
    };
    Ok(realm.new_array(elements))
}

/// Convert to a plain object.
///
/// Plain objects pass through. Arrays, sets and strings become index-keyed
/// objects, maps are keyed by the string form of their keys, nullish values
/// give `{}` and anything else is wrapped as `{ value }`.
pub fn to_object(classifier: &Classifier, value: &Value) -> Object {
    let realm = classifier.realm();
    let object = realm.new_object();
    let indexed = |items: Vec<Value>| {
        for (index, item) in items.into_iter().enumerate() {
            object.set(index.to_string(), item);
        }
    };
    match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Object), Value::Object(plain)) => return plain.clone(),
        (Some(BuiltinType::Array), Value::Object(array)) => {
            indexed(array.elements().unwrap_or_default());
        }
        (Some(BuiltinType::Set), Value::Object(set)) => indexed(set.set_values().unwrap_or_default()),
        (Some(BuiltinType::String), Value::String(text)) => indexed(characters(text)),
        (Some(BuiltinType::Map), Value::Object(map)) => {
            for (key, item) in map.map_entries().unwrap_or_default() {
                object.set(string_of(&key), item);
            }
        }
        (Some(BuiltinType::Null | BuiltinType::Undefined), _) => {}
        _ => {
            object.set("value", value.clone());
        }
    }
    object
}

/// Convert to a Map; `None` for kinds without a natural key/value view.
///
/// Plain objects contribute their own string-keyed entries, arrays and sets
/// are keyed by index.
pub fn to_map(classifier: &Classifier, value: &Value) -> HostResult<Option<Object>> {
    let realm = classifier.realm();
    let indexed = |items: Vec<Value>| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (Value::from(index), item))
            .collect::<Vec<_>>()
    };
    let entries = match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Map), Value::Object(map)) => return Ok(Some(map.clone())),
        (Some(BuiltinType::Object), Value::Object(object)) => own_entries(object)?
            .into_iter()
            .map(|(key, item)| (Value::from(key), item))
            .collect(),
        (Some(BuiltinType::Array), Value::Object(array)) => indexed(array.elements().unwrap_or_default()),
        (Some(BuiltinType::Set), Value::Object(set)) => indexed(set.set_values().unwrap_or_default()),
        _ => return Ok(None),
    };
    Ok(Some(realm.new_map(entries)))
}

/// Convert to a Set of distinct values.
///
/// Arrays, strings, map values and plain-object values are collected with
/// `SameValueZero` de-duplication; nullish values give an empty set and
/// anything else a singleton.
pub fn to_set(classifier: &Classifier, value: &Value) -> HostResult<Object> {
    let items = match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Set), Value::Object(set)) => return Ok(set.clone()),
        (Some(BuiltinType::Array), Value::Object(array)) => array.elements().unwrap_or_default(),
        (Some(BuiltinType::String), Value::String(text)) => characters(text),
        (Some(BuiltinType::Map), Value::Object(map)) => map
            .map_entries()
            .unwrap_or_default()
            .into_iter()
            .map(|(_, item)| item)
            .collect(),
        (Some(BuiltinType::Object), Value::Object(object)) => own_entries(object)?
            .into_iter()
            .map(|(_, item)| item)
            .collect(),
        (_, Value::Undefined | Value::Null) => Vec::new(),
        _ => vec![value.clone()],
    };
    Ok(classifier.realm().new_set(distinct(items)))
}

/// Convert to a Date; `None` when the input does not denote a valid instant.
///
/// Strings accept RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// (read as UTC) and RFC 2822; numbers are epoch milliseconds.
pub fn to_date(classifier: &Classifier, value: &Value) -> Option<Object> {
    let time = match (builtin_of(classifier, value)?, value) {
        (BuiltinType::Date, Value::Object(date)) => return Some(date.clone()),
        (BuiltinType::String, Value::String(text)) => parse_date(text)?,
        (BuiltinType::Number, Value::Number(n)) if is_valid_time(*n) => n.trunc(),
        _ => return None,
    };
    Some(classifier.realm().new_date(time))
}

/// Convert to a RegExp; strings must compile as a pattern
pub fn to_regexp(classifier: &Classifier, value: &Value) -> Option<Object> {
    match (builtin_of(classifier, value)?, value) {
        (BuiltinType::RegExp, Value::Object(regexp)) => Some(regexp.clone()),
        (BuiltinType::String, Value::String(source)) => match RegexBuilder::new(source).build() {
            Ok(_) => Some(classifier.realm().new_regexp(source, "")),
            Err(error) => {
                trace!(%error, "pattern rejected");
                None
            }
        },
        _ => None,
    }
}

/// Convert to an Error.
///
/// Errors pass through; strings become the message; objects with a
/// `message` property lend it; anything else is described by its string
/// form.
pub fn to_error(classifier: &Classifier, value: &Value) -> HostResult<Object> {
    let realm = classifier.realm();
    let message = match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Error), Value::Object(error)) => return Ok(error.clone()),
        (Some(BuiltinType::String), Value::String(text)) => text.clone(),
        (Some(BuiltinType::Object), Value::Object(object)) if object.has_property("message")? => {
            string_of(&object.get("message")?)
        }
        _ => string_of(value),
    };
    Ok(realm.new_error(&message))
}

/// The value itself when it is any kind of function
pub fn to_function(classifier: &Classifier, value: &Value) -> Option<Object> {
    match (builtin_of(classifier, value)?, value) {
        (
            BuiltinType::Function
            | BuiltinType::AsyncFunction
            | BuiltinType::GeneratorFunction
            | BuiltinType::AsyncGeneratorFunction,
            Value::Object(function),
        ) => Some(function.clone()),
        _ => None,
    }
}

/// Promises pass through; any other value is wrapped in a fresh promise.
///
/// Settlement values are not modelled by the host, so the wrapper carries
/// only its promise-ness.
pub fn to_promise(classifier: &Classifier, value: &Value) -> Object {
    match (builtin_of(classifier, value), value) {
        (Some(BuiltinType::Promise), Value::Object(promise)) => promise.clone(),
        _ => classifier.realm().new_promise(),
    }
}

/// Convert to a host buffer; `None` when the realm has no `Buffer` or the
/// kind has no byte view.
///
/// Strings are measured in UTF-8 bytes.
pub fn to_buffer(classifier: &Classifier, value: &Value) -> Option<Object> {
    let realm = classifier.realm();
    realm.intrinsics().buffer_prototype.as_ref()?;
    let length = match (builtin_of(classifier, value)?, value) {
        (BuiltinType::Buffer, Value::Object(buffer)) => return Some(buffer.clone()),
        (BuiltinType::String, Value::String(text)) => text.len(),
        (BuiltinType::Array, Value::Object(array)) => array.elements()?.len(),
        (BuiltinType::Uint8Array, Value::Object(bytes)) => bytes.typed_length()?,
        (BuiltinType::ArrayBuffer, Value::Object(buffer)) => buffer.byte_length()?,
        _ => return None,
    };
    realm.new_buffer(length).ok()
}

/// Convert to a typed array of `kind`.
///
/// An ArrayBuffer is viewed in place and must be a multiple of the element
/// size; arrays and other typed arrays are copied by length.
pub fn to_typed_array(classifier: &Classifier, value: &Value, kind: TypedArrayKind) -> Option<Object> {
    let realm = classifier.realm();
    let tag = classifier.classify(value);
    let object = value.as_object()?;
    if tag == BuiltinType::ArrayBuffer.as_str() {
        let byte_length = object.byte_length()?;
        if byte_length % kind.bytes_per_element() != 0 {
            return None;
        }
        let prototype = realm.intrinsics().typed_array_prototype_for(kind).clone();
        return Some(Object::new(
            ObjectClass::TypedArray {
                kind,
                buffer: object.clone(),
                byte_offset: 0,
                length: byte_length / kind.bytes_per_element(),
            },
            Some(prototype),
        ));
    }
    if tag == BuiltinType::Array.as_str() {
        return Some(realm.new_typed_array(kind, object.elements()?.len()));
    }
    if tag.as_str().contains("array") && object.is_array_buffer_view() {
        return Some(realm.new_typed_array(kind, object.typed_length().unwrap_or(0)));
    }
    None
}

/// Coerce `value` to the kind named `target`; `None` when no sensible
/// conversion exists.
///
/// A value already of the target kind is returned as is.
///
/// # Examples
///
/// ```
/// use classifier::{converters, Classifier};
/// use host_value::{Realm, Value};
///
/// let classifier = Classifier::new(&Realm::new());
/// assert_eq!(
///     converters::coerce_type(&classifier, &Value::from("42"), "number"),
///     Some(Value::from(42))
/// );
/// assert_eq!(converters::coerce_type(&classifier, &Value::from("x"), "number"), None);
/// assert_eq!(converters::coerce_type(&classifier, &Value::from(1), "weakmap"), None);
/// ```
pub fn coerce_type(classifier: &Classifier, value: &Value, target: &str) -> Option<Value> {
    let current = classifier.classify(value);
    if current == target {
        return Some(value.clone());
    }
    let coerced = match BuiltinType::from_name(target)? {
        BuiltinType::String => Value::from(to_string(classifier, value)),
        BuiltinType::Number => Value::from(to_number(classifier, value)?),
        BuiltinType::Boolean => Value::from(to_boolean(classifier, value)),
        BuiltinType::BigInt => Value::from(to_bigint(classifier, value)?),
        BuiltinType::Symbol => Value::from(to_symbol(classifier, value)),
        BuiltinType::Undefined => Value::Undefined,
        BuiltinType::Null => Value::Null,
        BuiltinType::Array if current.is_generic_object() => {
            let elements = array_like(value.as_object()?).ok()?;
            if elements.is_empty() {
                return None;
            }
            Value::from(classifier.realm().new_array(elements))
        }
        BuiltinType::Object if current == BuiltinType::Array.as_str() => {
            Value::from(to_object(classifier, value))
        }
        BuiltinType::Date if current == BuiltinType::String.as_str() => {
            Value::from(to_date(classifier, value)?)
        }
        _ => return None,
    };
    Some(coerced)
}

/// `String(value)`: never consults JSON
fn string_of(value: &Value) -> String {
    let mut seen = Vec::new();
    string_of_inner(&unboxed(value), &mut seen)
}

fn string_of_inner(value: &Value, seen: &mut Vec<usize>) -> String {
    let object = match value {
        Value::BigInt(n) => return n.to_string(),
        Value::Object(object) => object,
        other => return other.to_string(),
    };
    match object.class() {
        ObjectClass::Error { .. } => return error_string(object),
        ObjectClass::RegExp { .. } => return regexp_string(object),
        ObjectClass::Date(time) => {
            return utc_datetime(*time).map_or_else(
                || "Invalid Date".to_string(),
                |date| date.format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)").to_string(),
            );
        }
        _ => {}
    }
    if object.is_callable() {
        return function_string(object);
    }
    if let Some(elements) = object.elements().filter(|_| object.is_array().unwrap_or(false)) {
        // Array.prototype.join renders a cyclic reference as empty.
        if seen.contains(&object.identity()) {
            return String::new();
        }
        seen.push(object.identity());
        let joined = elements
            .iter()
            .map(|element| match element {
                Value::Undefined | Value::Null => String::new(),
                other => string_of_inner(&unboxed(other), seen),
            })
            .collect::<Vec<_>>()
            .join(",");
        seen.pop();
        return joined;
    }
    read_host_tag(object)
}

fn error_string(error: &Object) -> String {
    let name = match reflect::get(error, "name") {
        None | Some(Value::Undefined) => "Error".to_string(),
        Some(name) => string_of(&name),
    };
    let message = match reflect::get(error, "message") {
        None | Some(Value::Undefined) => String::new(),
        Some(message) => string_of(&message),
    };
    match (name.is_empty(), message.is_empty()) {
        (true, _) => message,
        (false, true) => name,
        (false, false) => format!("{}: {}", name, message),
    }
}

fn regexp_string(regexp: &Object) -> String {
    match regexp.class() {
        ObjectClass::RegExp { source, flags } => format!("/{}/{}", source, flags),
        _ => read_host_tag(regexp),
    }
}

fn function_string(function: &Object) -> String {
    function.function_source().unwrap_or_else(|_| {
        let name = reflect::function_name(function).unwrap_or_default();
        format!("function {}() {{ [native code] }}", name)
    })
}

fn is_valid_time(time: f64) -> bool {
    time.is_finite() && time.abs() <= MAX_TIME_VALUE
}

fn utc_datetime(time: f64) -> Option<DateTime<Utc>> {
    if !is_valid_time(time) {
        return None;
    }
    Utc.timestamp_millis_opt(time as i64).single()
}

/// `Date.prototype.toISOString`
fn iso_string(time: f64) -> Option<String> {
    utc_datetime(time).map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_date(text: &str) -> Option<f64> {
    let text = text.trim();
    let millis = if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        date.timestamp_millis()
    } else if let Some(naive) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        Utc.from_utc_datetime(&naive).timestamp_millis()
    } else if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?).timestamp_millis()
    } else if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        date.timestamp_millis()
    } else {
        return None;
    };
    let millis = millis as f64;
    is_valid_time(millis).then_some(millis)
}

fn trim_js(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Radix and digits of a `0x`/`0o`/`0b` literal
fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<BigInt> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigInt::parse_bytes(digits.as_bytes(), radix)
}

/// `Number(text)`, with `NaN` reported as `None`
fn parse_number(text: &str) -> Option<f64> {
    let text = trim_js(text);
    match text {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => match radix_literal(text) {
            Some((radix, digits)) => parse_radix_digits(digits, radix)?.to_f64(),
            None if DECIMAL_LITERAL.is_match(text) => text.parse().ok(),
            None => None,
        },
    }
}

/// `BigInt(text)`, with a SyntaxError reported as `None`
fn parse_bigint(text: &str) -> Option<BigInt> {
    let text = trim_js(text);
    if text.is_empty() {
        return Some(BigInt::zero());
    }
    match radix_literal(text) {
        Some((radix, digits)) => parse_radix_digits(digits, radix),
        None if INTEGER_LITERAL.is_match(text) => text.parse().ok(),
        None => None,
    }
}

fn characters(text: &str) -> Vec<Value> {
    text.chars().map(|c| Value::from(c.to_string())).collect()
}

fn own_string_keys(object: &Object) -> Vec<String> {
    object
        .own_keys()
        .into_iter()
        .filter_map(|key| match key {
            PropertyKey::String(name) => Some(name),
            PropertyKey::Symbol(_) => None,
        })
        .collect()
}

/// `Object.entries`: runs getters
fn own_entries(object: &Object) -> HostResult<Vec<(String, Value)>> {
    let mut entries = Vec::new();
    for key in own_string_keys(object) {
        let value = object.get(key.as_str())?;
        entries.push((key, value));
    }
    Ok(entries)
}

fn is_array_like(object: &Object) -> HostResult<bool> {
    Ok(object.elements().is_some()
        || object.typed_array_kind().is_some()
        || object.has_property("length")?)
}

/// `Array.from(arrayLike)` without iterator protocol
fn array_like(object: &Object) -> HostResult<Vec<Value>> {
    if let Some(elements) = object.elements() {
        return Ok(elements);
    }
    if let Some(kind) = object.typed_array_kind() {
        // Element storage is not modelled; fresh views are zero-filled.
        let zero = match kind {
            TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => Value::BigInt(BigInt::zero()),
            _ => Value::from(0),
        };
        return Ok(vec![zero; object.typed_length().unwrap_or(0)]);
    }
    let length = match object.get("length")? {
        Value::Number(n) if n.is_nan() || n <= 0.0 => 0.0,
        Value::Number(n) => n.trunc(),
        _ => 0.0,
    };
    if length > MAX_ARRAY_LENGTH {
        return Err(HostError::thrown("RangeError: Invalid array length"));
    }
    (0..length as usize)
        .map(|index| object.get(index.to_string()))
        .collect()
}

/// `SameValueZero` de-duplication, keeping first occurrences
fn distinct(items: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let duplicate = unique.iter().any(|seen| match (seen, &item) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            (a, b) => a == b,
        });
        if !duplicate {
            unique.push(item);
        }
    }
    unique
}

/// `JSON.stringify` for arrays and plain objects.
///
/// Functions, symbols and `undefined` are dropped from objects and become
/// `null` inside arrays. BigInts and cycles throw.
fn json_string(value: &Value) -> HostResult<String> {
    let mut stack = Vec::new();
    let json = to_json(value, &mut stack)?.unwrap_or(serde_json::Value::Null);
    serde_json::to_string(&json).map_err(|error| HostError::type_error(error.to_string()))
}

fn json_number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        serde_json::Value::Null
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

fn to_json(value: &Value, stack: &mut Vec<usize>) -> HostResult<Option<serde_json::Value>> {
    let json = match value {
        Value::Undefined | Value::Symbol(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => json_number(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::BigInt(_) => return Err(HostError::type_error("Do not know how to serialize a BigInt")),
        Value::Object(object) if object.is_callable() => return Ok(None),
        Value::Object(object) => {
            if stack.contains(&object.identity()) {
                return Err(HostError::type_error("Converting circular structure to JSON"));
            }
            stack.push(object.identity());
            let json = object_to_json(object, stack);
            stack.pop();
            json?
        }
    };
    Ok(Some(json))
}

fn object_to_json(object: &Object, stack: &mut Vec<usize>) -> HostResult<serde_json::Value> {
    match object.class() {
        ObjectClass::Date(time) => {
            return Ok(iso_string(*time).map_or(serde_json::Value::Null, serde_json::Value::String));
        }
        ObjectClass::Boolean(_) | ObjectClass::Number(_) | ObjectClass::String(_) | ObjectClass::BigInt(_) => {
            return Ok(to_json(&unboxed(&Value::from(object)), stack)?.unwrap_or(serde_json::Value::Null));
        }
        _ => {}
    }
    if object.is_array()? {
        let mut items = Vec::new();
        for element in object.elements().unwrap_or_default() {
            items.push(to_json(&element, stack)?.unwrap_or(serde_json::Value::Null));
        }
        return Ok(serde_json::Value::Array(items));
    }
    let mut map = serde_json::Map::new();
    for (key, item) in own_entries(object)? {
        if let Some(json) = to_json(&item, stack)? {
            map.insert(key, json);
        }
    }
    Ok(serde_json::Value::Object(map))
}
