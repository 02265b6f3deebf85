//! Built-in plugins for common host libraries.
//!
//! Each plugin is a set of structural predicates over host values. Install
//! them with [`ExtensibleClassifier::register_plugin`](crate::ExtensibleClassifier::register_plugin):
//!
//! ```
//! use classifier::{plugins, ExtensibleClassifier, PluginOptions};
//! use host_value::{Realm, Value};
//!
//! let realm = Realm::new();
//! let classifier = ExtensibleClassifier::new(&realm);
//! classifier.register_plugin(plugins::node(), PluginOptions::default()).unwrap();
//!
//! let server = realm.new_object();
//! server.set("listen", realm.new_native_function("listen"));
//! server.set("close", realm.new_native_function("close"));
//! server.set("address", realm.new_native_function("address"));
//! assert_eq!(classifier.classify(&Value::from(server)), "node.server");
//! ```

mod node;
mod react;

pub use node::node;
pub use react::react;

use host_value::{Object, Value};

use crate::capability::CapabilitySet;
use crate::reflect;

/// `value !== null && typeof value === "object"`
fn plain_object(value: &Value) -> Option<&Object> {
    match value {
        Value::Object(object) if !object.is_callable() => Some(object),
        _ => None,
    }
}

/// A non-callable object satisfying every requirement of `set`
fn object_with(value: &Value, set: CapabilitySet) -> bool {
    plain_object(value).is_some_and(|object| set.matches_object(object))
}

/// `value.constructor.name === name`
fn constructed_by(value: &Value, name: &str) -> bool {
    reflect::constructor_name(value).is_some_and(|found| found == name)
}

/// String form of `object[key]` when it is a symbol, e.g. `Symbol(react.memo)`
fn symbol_member(object: &Object, key: &str) -> Option<String> {
    match reflect::get(object, key)? {
        Value::Symbol(symbol) => Some(symbol.to_string()),
        _ => None,
    }
}
