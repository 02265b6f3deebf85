//! React elements, components and special objects.
//!
//! React brands its objects with a `$$typeof` symbol from the global symbol
//! registry (`Symbol.for("react.memo")`, ...); most checks compare the
//! symbol's string form.

use std::sync::LazyLock;

use host_value::{Object, Value};
use regex::Regex;

use super::{object_with, plain_object, symbol_member};
use crate::capability::{Capability, CapabilitySet};
use crate::extensible::Plugin;
use crate::reflect;

static COMPONENT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]").unwrap());

const ELEMENT: CapabilitySet = CapabilitySet::new(&[
    Capability::present("$$typeof"),
    Capability::present("type"),
    Capability::present("props"),
]);

const CONTEXT: CapabilitySet = CapabilitySet::new(&[
    Capability::present("$$typeof"),
    Capability::present("_currentValue"),
    Capability::present("Provider"),
    Capability::present("Consumer"),
]);

/// A branded object with the listed members whose `$$typeof` is `Symbol(brand)`
fn branded(value: &Value, members: &[&str], brand: &str) -> bool {
    plain_object(value).is_some_and(|object| {
        members.iter().all(|member| reflect::has(object, *member))
            && symbol_member(object, "$$typeof").is_some_and(|found| is_symbol_named(&found, brand))
    })
}

/// An element whose `type` is `Symbol(brand)`
fn element_of(value: &Value, brand: &str) -> bool {
    plain_object(value).is_some_and(|object| {
        reflect::has(object, "$$typeof")
            && symbol_member(object, "type").is_some_and(|found| is_symbol_named(&found, brand))
    })
}

fn is_symbol_named(rendered: &str, brand: &str) -> bool {
    rendered
        .strip_prefix("Symbol(")
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|description| description == brand)
}

fn is_component(value: &Value) -> bool {
    let Some(function) = value.as_object().filter(|object| object.is_callable()) else {
        return false;
    };
    if is_class_component(function) {
        return true;
    }
    reflect::function_name(function).is_some_and(|name| COMPONENT_NAME.is_match(&name))
}

fn is_class_component(function: &Object) -> bool {
    match reflect::get(function, "prototype") {
        Some(Value::Object(prototype)) => {
            reflect::get(&prototype, "isReactComponent").is_some_and(|flag| flag.is_truthy())
        }
        _ => false,
    }
}

/// React element and component shapes.
///
/// Rules are named `react.<kind>`. Components are recognized by an
/// `isReactComponent` prototype flag or, for function components, by a
/// capitalized name.
pub fn react() -> Plugin {
    Plugin::new("react", "1.0.0")
        .with_type("react.element", |v: &Value| object_with(v, ELEMENT))
        .with_type("react.component", is_component)
        .with_type("react.memo", |v: &Value| branded(v, &["type"], "react.memo"))
        .with_type("react.forwardref", |v: &Value| {
            branded(v, &["render"], "react.forward_ref")
        })
        .with_type("react.lazy", |v: &Value| {
            branded(v, &["_payload", "_init"], "react.lazy")
        })
        .with_type("react.context", |v: &Value| object_with(v, CONTEXT))
        .with_type("react.provider", |v: &Value| {
            branded(v, &["_context"], "react.provider")
        })
        .with_type("react.consumer", |v: &Value| {
            branded(v, &["_context"], "react.consumer")
        })
        .with_type("react.fragment", |v: &Value| element_of(v, "react.fragment"))
        .with_type("react.portal", |v: &Value| {
            branded(v, &["children", "containerInfo"], "react.portal")
        })
        .with_type("react.suspense", |v: &Value| element_of(v, "react.suspense"))
        .with_type("react.profiler", |v: &Value| element_of(v, "react.profiler"))
        .with_type("react.strictmode", |v: &Value| {
            element_of(v, "react.strict_mode")
        })
}
