//! Modern-type classifier.
//!
//! A second opinion for objects whose host tag is generic. Each check is an
//! identity test against the home realm's intrinsic prototype (immediate
//! prototype pointer, then `instanceof`) or an internal-slot brand check,
//! so instances from other realms are still recognized. Any host exception
//! during a check means "not this type".
//!
//! Proxy detection is best effort only: a proxy answers reflective queries
//! on behalf of its target, so [`ProxyHeuristic`] implementations may
//! report false negatives.

use std::fmt;

use host_value::{Object, ObjectClass, Realm, Symbol, Value};

use crate::capability::THENABLE;
use crate::internal_tag::read_host_tag;
use crate::tag::BuiltinType;

/// Decides whether an object is a proxy.
///
/// Never consulted before every other modern check has missed, so a wrong
/// answer can only turn a generic `object` into `proxy` or vice versa.
pub trait ProxyHeuristic: Send + Sync + fmt::Debug {
    /// Whether `object` looks like a proxy
    fn is_proxy(&self, object: &Object) -> bool;
}

/// Reports a proxy only when the host says so through its class string or a
/// `Symbol.toStringTag` of `"Proxy"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagProxyHeuristic;

impl ProxyHeuristic for TagProxyHeuristic {
    fn is_proxy(&self, object: &Object) -> bool {
        if read_host_tag(object) == "[object Proxy]" {
            return true;
        }
        matches!(object.get(Symbol::to_string_tag()), Ok(Value::String(tag)) if tag == "Proxy")
    }
}

/// Asks the host model directly whether the object is a proxy exotic object.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProxyProbe;

impl ProxyHeuristic for HostProxyProbe {
    fn is_proxy(&self, object: &Object) -> bool {
        object.is_proxy()
    }
}

/// Classify promise-likes, keyed collections, buffers, views and proxies.
///
/// Returns `None` when nothing matches; the caller supplies the default.
///
/// # Examples
///
/// ```
/// use classifier::{classify_modern, BuiltinType, TagProxyHeuristic};
/// use host_value::{Realm, Value};
///
/// let home = Realm::new();
/// let other = Realm::new();
///
/// // A Map from another realm with its tag stripped is still a Map.
/// let map = other.new_map(vec![]);
/// map.set_prototype(None).unwrap();
/// let found = classify_modern(&home, &TagProxyHeuristic, &Value::from(map));
/// assert_eq!(found, Some(BuiltinType::Map));
/// ```
pub fn classify_modern(
    realm: &Realm,
    proxy_heuristic: &dyn ProxyHeuristic,
    value: &Value,
) -> Option<BuiltinType> {
    let object = value.as_object()?;
    let intrinsics = realm.intrinsics();

    if THENABLE.matches_object(object) || is_instance(object, &intrinsics.promise_prototype) {
        return Some(BuiltinType::Promise);
    }

    let checks: [(BuiltinType, Option<&Object>, fn(&ObjectClass) -> bool); 7] = [
        (BuiltinType::Map, Some(&intrinsics.map_prototype), |c| {
            matches!(c, ObjectClass::Map(_))
        }),
        (BuiltinType::Set, Some(&intrinsics.set_prototype), |c| {
            matches!(c, ObjectClass::Set(_))
        }),
        (BuiltinType::WeakMap, Some(&intrinsics.weak_map_prototype), |c| {
            matches!(c, ObjectClass::WeakMap)
        }),
        (BuiltinType::WeakSet, Some(&intrinsics.weak_set_prototype), |c| {
            matches!(c, ObjectClass::WeakSet)
        }),
        (
            BuiltinType::ArrayBuffer,
            Some(&intrinsics.array_buffer_prototype),
            |c| matches!(c, ObjectClass::ArrayBuffer { .. }),
        ),
        (
            BuiltinType::SharedArrayBuffer,
            intrinsics.shared_array_buffer_prototype.as_ref(),
            |c| matches!(c, ObjectClass::SharedArrayBuffer { .. }),
        ),
        (
            BuiltinType::DataView,
            Some(&intrinsics.data_view_prototype),
            |c| matches!(c, ObjectClass::DataView { .. }),
        ),
    ];

    for (builtin, prototype, has_brand) in checks {
        // Hosts without the constructor skip the check entirely.
        let Some(prototype) = prototype else {
            continue;
        };
        if is_instance(object, prototype) || has_brand(object.class()) {
            return Some(builtin);
        }
    }

    if proxy_heuristic.is_proxy(object) {
        return Some(BuiltinType::Proxy);
    }
    None
}

fn is_instance(object: &Object, prototype: &Object) -> bool {
    match object.prototype_of() {
        Ok(Some(direct)) if direct.ptr_eq(prototype) => true,
        Ok(_) => object.instance_of(prototype).unwrap_or(false),
        Err(_) => false,
    }
}
