//! Internal-tag classifier.
//!
//! Reads the host class string (`Object.prototype.toString`) and looks it up
//! in the internal tag table. When the lookup misses or only yields the
//! generic `object` tag, a fixed-order fallback chain of structural checks
//! runs: host buffer, arguments, stream, event emitter, DOM element, DOM node
//! and finally the global object.
//!
//! A custom `Symbol.toStringTag` or constructor name is never reported from
//! here: the orchestrator applies [`custom_type`] only after the modern and
//! typed-array checks have missed.
//!
//! Functions are dispatched to a subkind detector that reads the source
//! text, falling back to the constructor name when the source is unavailable.

use std::sync::LazyLock;

use host_value::{Object, Realm, Symbol, Value};
use regex::Regex;
use tracing::trace;

use crate::capability::{EVENT_EMITTER, STREAM};
use crate::primitive::classify_primitive;
use crate::reflect;
use crate::tag::{lookup_internal_tag, BuiltinType, TypeTag};

/// Class string reported for plain objects.
pub const GENERIC_TAG: &str = "[object Object]";

static CLASS_SOURCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^class\s").unwrap());
static ASYNC_GENERATOR_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^async\s*function\s*\*|^async\s*\*").unwrap());
static ASYNC_SOURCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^async\s").unwrap());
static GENERATOR_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s*\*|^\*").unwrap());

/// The host class string of an object.
///
/// A throwing `Symbol.toStringTag` getter or a revoked proxy yields the
/// generic tag.
pub fn read_host_tag(object: &Object) -> String {
    match object.class_string() {
        Ok(tag) => tag,
        Err(error) => {
            trace!(%error, "host tag unreadable, assuming plain object");
            GENERIC_TAG.to_string()
        }
    }
}

/// Classify by internal class tag with the heuristic fallback chain.
///
/// # Examples
///
/// ```
/// use classifier::classify_by_internal_tag;
/// use host_value::{FunctionKind, Realm, Value};
///
/// let realm = Realm::new();
/// let gen = realm.new_function(FunctionKind::Generator, "g", "function* g() {}");
/// assert_eq!(classify_by_internal_tag(&realm, &Value::from(gen)), "generatorfunction");
///
/// let widget = realm.new_class("Widget").instantiate();
/// assert_eq!(classify_by_internal_tag(&realm, &Value::from(&widget)), "object");
/// assert_eq!(classifier::custom_type(&realm, &widget).unwrap(), "widget");
/// ```
pub fn classify_by_internal_tag(realm: &Realm, value: &Value) -> TypeTag {
    if let Some(primitive) = classify_primitive(value) {
        return primitive.into();
    }
    match value {
        Value::Object(object) if object.is_callable() => function_subkind(object).into(),
        Value::Object(object) => classify_object(realm, object),
        _ => BuiltinType::Object.into(),
    }
}

fn classify_object(realm: &Realm, object: &Object) -> TypeTag {
    let tag = read_host_tag(object);
    if let Some(builtin) = lookup_internal_tag(&tag) {
        if builtin != BuiltinType::Object {
            return builtin.into();
        }
    }

    if is_host_buffer(realm, object) {
        return BuiltinType::Buffer.into();
    }
    // `in` only: reading a strict-mode `callee` throws.
    if reflect::has(object, "callee") {
        return BuiltinType::Arguments.into();
    }
    if STREAM.matches_object(object) {
        return BuiltinType::Stream.into();
    }
    if EVENT_EMITTER.matches_object(object) {
        return BuiltinType::EventEmitter.into();
    }
    if is_dom_element(realm, object) {
        return BuiltinType::Element.into();
    }
    if is_dom_node(realm, object) {
        return BuiltinType::Node.into();
    }
    if is_global(realm, object) {
        return BuiltinType::Global.into();
    }
    BuiltinType::Object.into()
}

/// Tag derived from a custom `Symbol.toStringTag` or constructor name.
///
/// Used by the orchestrator as the last resort before `object`.
pub fn custom_type(realm: &Realm, object: &Object) -> Option<TypeTag> {
    custom_to_string_tag(object).or_else(|| custom_constructor_name(realm, object))
}

fn custom_to_string_tag(object: &Object) -> Option<TypeTag> {
    match reflect::get(object, Symbol::to_string_tag())? {
        Value::String(tag) if !tag.is_empty() => Some(TypeTag::from_name(&tag.to_lowercase())),
        _ => None,
    }
}

fn custom_constructor_name(realm: &Realm, object: &Object) -> Option<TypeTag> {
    let constructor = reflect::constructor_of(object)?;
    if constructor.ptr_eq(&realm.intrinsics().object_constructor) {
        return None;
    }
    let name = reflect::function_name(&constructor)?;
    if name == "Object" {
        return None;
    }
    Some(TypeTag::from_name(&name.to_lowercase()))
}

fn function_subkind(function: &Object) -> BuiltinType {
    match function.function_source() {
        Ok(source) => {
            if CLASS_SOURCE.is_match(&source) {
                return BuiltinType::Function;
            }
            if ASYNC_GENERATOR_SOURCE.is_match(&source) {
                return BuiltinType::AsyncGeneratorFunction;
            }
            if ASYNC_SOURCE.is_match(&source) {
                return BuiltinType::AsyncFunction;
            }
            if GENERATOR_SOURCE.is_match(&source) {
                return BuiltinType::GeneratorFunction;
            }
        }
        Err(error) => trace!(%error, "function source unavailable"),
    }

    let constructor = reflect::constructor_of(function);
    match constructor.as_ref().and_then(reflect::function_name).as_deref() {
        Some("AsyncFunction") => BuiltinType::AsyncFunction,
        Some("GeneratorFunction") => BuiltinType::GeneratorFunction,
        Some("AsyncGeneratorFunction") => BuiltinType::AsyncGeneratorFunction,
        _ => BuiltinType::Function,
    }
}

fn inherits(object: &Object, prototype: Option<&Object>) -> bool {
    prototype.is_some_and(|proto| object.instance_of(proto).unwrap_or(false))
}

fn is_host_buffer(realm: &Realm, object: &Object) -> bool {
    inherits(object, realm.intrinsics().buffer_prototype.as_ref())
}

fn is_dom_element(realm: &Realm, object: &Object) -> bool {
    inherits(object, realm.intrinsics().html_element_prototype.as_ref())
}

fn is_dom_node(realm: &Realm, object: &Object) -> bool {
    inherits(object, realm.intrinsics().node_prototype.as_ref())
}

fn is_global(realm: &Realm, object: &Object) -> bool {
    realm
        .global_aliases()
        .iter()
        .any(|alias| alias.ptr_eq(object))
}
