//! Runtime value classification.
//!
//! This crate maps any [`host_value::Value`] to a canonical lowercase type
//! tag such as `"array"`, `"map"`, `"promise"` or `"int32array"`:
//! - Primitive discrimination and the internal tag table
//! - Heuristic fallbacks for modern built-ins, typed arrays and host objects
//! - An identity-keyed cache that never keeps objects alive
//! - Detailed type reports with size metadata
//! - A user-extensible classifier with plugins
//! - Classification-driven conversions and a value inspector
//!
//! # Example
//!
//! ```
//! use classifier::{Classifier, ExtensibleClassifier};
//! use host_value::{FunctionKind, Realm, Value};
//!
//! let realm = Realm::new();
//! let classifier = Classifier::new(&realm);
//!
//! assert_eq!(classifier.classify(&Value::Undefined), "undefined");
//! let f = realm.new_function(FunctionKind::Async, "f", "async () => {}");
//! assert_eq!(classifier.classify(&Value::from(f)), "asyncfunction");
//!
//! let custom = ExtensibleClassifier::with_classifier(classifier);
//! custom
//!     .define_type("email", |v: &Value| v.as_str().is_some_and(|s| s.contains('@')))
//!     .unwrap();
//! assert_eq!(custom.classify(&Value::from("a@b.com")), "email");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod cache;
mod classifier;
mod config;
mod detailed;
mod error;
mod extensible;
mod internal_tag;
mod modern;
mod primitive;
mod tag;
mod typed_array;

pub mod capability;
pub mod converters;
pub mod guards;
pub mod inspect;
pub mod plugins;
pub mod reflect;
pub mod stats;

// Re-export main types at crate root
pub use cache::{CacheStats, ClassificationCache};
pub use classifier::{Classifier, ClassifierBuilder};
pub use config::{ClassifierConfig, InspectOptions};
pub use detailed::{DetailedTypeInfo, TypeMetadata};
pub use error::{ConfigError, GuardError, RegistryError};
pub use extensible::{ExtensibleClassifier, Plugin, PluginOptions, Predicate};
pub use internal_tag::{classify_by_internal_tag, custom_type, read_host_tag, GENERIC_TAG};
pub use modern::{classify_modern, HostProxyProbe, ProxyHeuristic, TagProxyHeuristic};
pub use primitive::classify_primitive;
pub use tag::{lookup_internal_tag, BuiltinType, TypeCategory, TypeTag, INTERNAL_TAG_TABLE};
pub use typed_array::{classify_typed_array, typed_array_type};
