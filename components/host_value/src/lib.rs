//! Dynamically typed host value model.
//!
//! This crate provides the runtime the classifier inspects: primitive values,
//! heap objects with prototype chains and accessors, proxies, and realms
//! holding the intrinsic prototypes of a JavaScript-like host.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of host values
//! - [`Object`] - Shared handle to a heap object with internal slots
//! - [`Realm`] - Intrinsics, global object and factories for built-ins
//! - [`Symbol`] - Unique symbols, `Symbol.for` and well-known symbols
//! - [`HostError`] - Exceptions thrown by reflective operations
//!
//! # Examples
//!
//! ```
//! use host_value::{FunctionKind, Realm, Value};
//!
//! let realm = Realm::new();
//!
//! let array = Value::from(realm.new_array(vec![Value::from(1), Value::from(2)]));
//! assert_eq!(array.type_of(), "object");
//!
//! let f = realm.new_function(FunctionKind::Arrow, "f", "() => 1");
//! assert_eq!(Value::from(f).type_of(), "function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod object;
mod realm;
mod symbol;
mod value;

pub use error::{HostError, HostResult};
pub use object::{
    FunctionData, FunctionKind, FunctionSource, GetTrap, Getter, Object, ObjectClass, Property,
    ProxyData, TypedArrayKind, WeakObject,
};
pub use realm::{Class, HostFlavor, Intrinsics, Realm, RealmBuilder};
pub use symbol::Symbol;
pub use value::{PropertyKey, Value};
