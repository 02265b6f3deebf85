//! Heap objects: internal class slots, own properties and prototype chains.
//!
//! An [`Object`] is a shared handle to an object cell. The cell holds an
//! immutable [`ObjectClass`] (the engine-level internal slots that decide what
//! built-in the object is) and mutable state (prototype plus ordered own
//! properties) behind a lock. Every reflective operation mirrors the
//! corresponding ECMAScript abstract operation and can fail with a
//! [`HostError`] the same way a real engine throws.

use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use num_bigint::BigInt;
use parking_lot::RwLock;

use crate::error::{HostError, HostResult};
use crate::symbol::Symbol;
use crate::value::{PropertyKey, Value};

/// Upper bound on prototype-chain walks; proxies can form cycles the
/// `set_prototype` check cannot see.
const MAX_PROTOTYPE_DEPTH: usize = 4096;

/// Accessor getter. Receives the original receiver of the property read.
pub type Getter = Arc<dyn Fn(&Value) -> HostResult<Value> + Send + Sync>;

/// Proxy `get` trap: `(target, key, receiver)`.
pub type GetTrap = Arc<dyn Fn(&Object, &PropertyKey, &Value) -> HostResult<Value> + Send + Sync>;

/// An own property slot.
#[derive(Clone)]
pub enum Property {
    /// Plain data property
    Data(Value),
    /// Accessor property; reading it runs the getter
    Accessor(Getter),
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Data(v) => f.debug_tuple("Data").field(v).finish(),
            Property::Accessor(_) => write!(f, "Accessor(<getter>)"),
        }
    }
}

/// TypedArray element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    /// 8-bit signed integer
    Int8,
    /// 8-bit unsigned integer
    Uint8,
    /// 8-bit unsigned integer (clamped)
    Uint8Clamped,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    Uint32,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// 64-bit signed BigInt
    BigInt64,
    /// 64-bit unsigned BigInt
    BigUint64,
}

impl TypedArrayKind {
    /// Every typed array kind, in constructor declaration order
    pub const ALL: [TypedArrayKind; 11] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
        TypedArrayKind::BigInt64,
        TypedArrayKind::BigUint64,
    ];

    /// Constructor name, e.g. `"Int32Array"`
    pub fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }

    /// Size of one element in bytes
    pub fn bytes_per_element(self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 | TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => 8,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// What a function object was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function f() {}`
    Normal,
    /// `() => {}`
    Arrow,
    /// `class C {}`
    Class,
    /// `async function f() {}` / `async () => {}`
    Async,
    /// `function* g() {}`
    Generator,
    /// `async function* g() {}`
    AsyncGenerator,
}

/// What `Function.prototype.toString` yields for a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSource {
    /// User source text
    Text(String),
    /// Built-in function, rendered as `function name() { [native code] }`
    Native,
    /// Source retrieval throws
    Unavailable,
}

/// Internal slots of a function object.
#[derive(Debug, Clone)]
pub struct FunctionData {
    /// The function's `name`
    pub name: String,
    /// Declaration form
    pub kind: FunctionKind,
    /// Source text as reported by the host
    pub source: FunctionSource,
}

impl FunctionData {
    /// Create function data with native source
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        FunctionData {
            name: name.into(),
            kind,
            source: FunctionSource::Native,
        }
    }

    /// Attach user source text
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = FunctionSource::Text(source.into());
        self
    }

    /// Make source retrieval throw
    pub fn without_source(mut self) -> Self {
        self.source = FunctionSource::Unavailable;
        self
    }
}

/// Internal slots of a proxy exotic object.
pub struct ProxyData {
    target: RwLock<Option<Object>>,
    callable: bool,
    get_trap: Option<GetTrap>,
}

impl ProxyData {
    /// Wrap `target`, optionally intercepting property reads
    pub fn new(target: Object, get_trap: Option<GetTrap>) -> Self {
        ProxyData {
            callable: target.is_callable(),
            target: RwLock::new(Some(target)),
            get_trap,
        }
    }

    /// The proxied target, or a TypeError once revoked
    pub fn target(&self) -> HostResult<Object> {
        self.target.read().clone().ok_or_else(|| {
            HostError::type_error("Cannot perform operation on a proxy that has been revoked")
        })
    }

    /// Whether `Proxy.revocable`'s revoke has been called
    pub fn is_revoked(&self) -> bool {
        self.target.read().is_none()
    }

    fn revoke(&self) {
        *self.target.write() = None;
    }
}

/// Engine-level internal class of an object.
///
/// This is what distinguishes a `Map` from an ordinary object that merely
/// inherits from `Map.prototype`.
pub enum ObjectClass {
    /// Plain object
    Ordinary,
    /// Array exotic object
    Array(Vec<Value>),
    /// Arguments exotic object
    Arguments(Vec<Value>),
    /// Function object
    Function(FunctionData),
    /// `new Boolean(b)`
    Boolean(bool),
    /// `new Number(n)`
    Number(f64),
    /// `new String(s)`
    String(String),
    /// `Object(symbol)`
    Symbol(Symbol),
    /// `Object(bigint)`
    BigInt(BigInt),
    /// Date with its time value
    Date(f64),
    /// RegExp with source and flags
    RegExp {
        /// Pattern source
        source: String,
        /// Flag characters
        flags: String,
    },
    /// Error instance
    Error {
        /// Error name, e.g. `TypeError`
        name: String,
        /// Error message
        message: String,
    },
    /// Map entries in insertion order
    Map(Vec<(Value, Value)>),
    /// Set values in insertion order
    Set(Vec<Value>),
    /// WeakMap
    WeakMap,
    /// WeakSet
    WeakSet,
    /// Promise
    Promise,
    /// ArrayBuffer
    ArrayBuffer {
        /// Length in bytes
        byte_length: usize,
    },
    /// SharedArrayBuffer
    SharedArrayBuffer {
        /// Length in bytes
        byte_length: usize,
    },
    /// DataView over a buffer
    DataView {
        /// Viewed buffer
        buffer: Object,
        /// Offset into the buffer
        byte_offset: usize,
        /// Length of the view in bytes
        byte_length: usize,
    },
    /// Integer-indexed exotic object
    TypedArray {
        /// Element kind
        kind: TypedArrayKind,
        /// Viewed buffer
        buffer: Object,
        /// Offset into the buffer
        byte_offset: usize,
        /// Element count
        length: usize,
    },
    /// Proxy exotic object
    Proxy(ProxyData),
}

impl ObjectClass {
    /// Short name of the internal class, for debugging
    pub fn name(&self) -> &'static str {
        match self {
            ObjectClass::Ordinary => "Ordinary",
            ObjectClass::Array(_) => "Array",
            ObjectClass::Arguments(_) => "Arguments",
            ObjectClass::Function(_) => "Function",
            ObjectClass::Boolean(_) => "Boolean",
            ObjectClass::Number(_) => "Number",
            ObjectClass::String(_) => "String",
            ObjectClass::Symbol(_) => "Symbol",
            ObjectClass::BigInt(_) => "BigInt",
            ObjectClass::Date(_) => "Date",
            ObjectClass::RegExp { .. } => "RegExp",
            ObjectClass::Error { .. } => "Error",
            ObjectClass::Map(_) => "Map",
            ObjectClass::Set(_) => "Set",
            ObjectClass::WeakMap => "WeakMap",
            ObjectClass::WeakSet => "WeakSet",
            ObjectClass::Promise => "Promise",
            ObjectClass::ArrayBuffer { .. } => "ArrayBuffer",
            ObjectClass::SharedArrayBuffer { .. } => "SharedArrayBuffer",
            ObjectClass::DataView { .. } => "DataView",
            ObjectClass::TypedArray { .. } => "TypedArray",
            ObjectClass::Proxy(_) => "Proxy",
        }
    }
}

impl fmt::Debug for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct ObjectState {
    prototype: Option<Object>,
    properties: IndexMap<PropertyKey, Property>,
}

struct ObjectCell {
    class: ObjectClass,
    state: RwLock<ObjectState>,
}

/// Shared handle to a heap object. Cloning the handle does not copy the object.
///
/// # Examples
///
/// ```
/// use host_value::{Object, ObjectClass, Value};
///
/// let proto = Object::ordinary(None);
/// proto.set("greeting", "hi");
///
/// let obj = Object::ordinary(Some(&proto));
/// assert_eq!(obj.get("greeting").unwrap(), Value::from("hi"));
/// assert!(obj.instance_of(&proto).unwrap());
/// assert_eq!(obj.class_string().unwrap(), "[object Object]");
/// ```
#[derive(Clone)]
pub struct Object(Arc<ObjectCell>);

impl Object {
    /// Allocate an object with the given internal class and prototype
    pub fn new(class: ObjectClass, prototype: Option<Object>) -> Self {
        Object(Arc::new(ObjectCell {
            class,
            state: RwLock::new(ObjectState {
                prototype,
                properties: IndexMap::new(),
            }),
        }))
    }

    /// Allocate a plain object (`Object.create(prototype)`)
    pub fn ordinary(prototype: Option<&Object>) -> Self {
        Object::new(ObjectClass::Ordinary, prototype.cloned())
    }

    /// The object's internal class
    pub fn class(&self) -> &ObjectClass {
        &self.0.class
    }

    /// Identity of this object: the address of its allocation
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Reference equality
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Non-owning handle that does not keep the object alive
    pub fn downgrade(&self) -> WeakObject {
        WeakObject(Arc::downgrade(&self.0))
    }

    /// Define or overwrite an own data property
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> &Self {
        self.0
            .state
            .write()
            .properties
            .insert(key.into(), Property::Data(value.into()));
        self
    }

    /// Define or overwrite an own accessor property
    pub fn define_getter<F>(&self, key: impl Into<PropertyKey>, getter: F) -> &Self
    where
        F: Fn(&Value) -> HostResult<Value> + Send + Sync + 'static,
    {
        self.0
            .state
            .write()
            .properties
            .insert(key.into(), Property::Accessor(Arc::new(getter)));
        self
    }

    /// Remove an own property, returning whether it existed
    pub fn delete(&self, key: impl Into<PropertyKey>) -> bool {
        self.0
            .state
            .write()
            .properties
            .shift_remove(&key.into())
            .is_some()
    }

    /// Own property keys in insertion order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.0.state.read().properties.keys().cloned().collect()
    }

    /// Own property slot, without running getters
    pub fn own_property(&self, key: impl Into<PropertyKey>) -> Option<Property> {
        self.0.state.read().properties.get(&key.into()).cloned()
    }

    /// `Object.setPrototypeOf`; rejects cycles
    pub fn set_prototype(&self, prototype: Option<&Object>) -> HostResult<()> {
        if let ObjectClass::Proxy(proxy) = self.class() {
            return proxy.target()?.set_prototype(prototype);
        }
        let mut cursor = prototype.cloned();
        let mut depth = 0;
        while let Some(obj) = cursor {
            if obj.ptr_eq(self) {
                return Err(HostError::type_error("Cyclic __proto__ value"));
            }
            depth += 1;
            if depth > MAX_PROTOTYPE_DEPTH {
                break;
            }
            cursor = obj.prototype_of().unwrap_or(None);
        }
        self.0.state.write().prototype = prototype.cloned();
        Ok(())
    }

    /// `[[GetPrototypeOf]]`
    pub fn prototype_of(&self) -> HostResult<Option<Object>> {
        match self.class() {
            ObjectClass::Proxy(proxy) => proxy.target()?.prototype_of(),
            _ => Ok(self.0.state.read().prototype.clone()),
        }
    }

    /// `[[Get]]` with this object as receiver
    pub fn get(&self, key: impl Into<PropertyKey>) -> HostResult<Value> {
        let receiver = Value::Object(self.clone());
        self.get_with_receiver(&key.into(), &receiver)
    }

    /// `[[Get]]` walking the prototype chain; getters see `receiver`
    pub fn get_with_receiver(&self, key: &PropertyKey, receiver: &Value) -> HostResult<Value> {
        let mut current = self.clone();
        for _ in 0..MAX_PROTOTYPE_DEPTH {
            if let ObjectClass::Proxy(proxy) = current.class() {
                let target = proxy.target()?;
                if let Some(trap) = &proxy.get_trap {
                    return trap(&target, key, receiver);
                }
                current = target;
                continue;
            }

            // Release the lock before running a getter; it may touch this object.
            let (own, prototype) = {
                let state = current.0.state.read();
                (state.properties.get(key).cloned(), state.prototype.clone())
            };
            match own {
                Some(Property::Data(value)) => return Ok(value),
                Some(Property::Accessor(getter)) => return getter(receiver),
                None => {}
            }
            if let Some(value) = current.virtual_property(key) {
                return Ok(value);
            }
            match prototype {
                Some(next) => current = next,
                None => return Ok(Value::Undefined),
            }
        }
        Err(HostError::type_error("Maximum prototype chain depth exceeded"))
    }

    /// The `in` operator. Never runs getters.
    pub fn has_property(&self, key: impl Into<PropertyKey>) -> HostResult<bool> {
        let key = key.into();
        let mut current = self.clone();
        for _ in 0..MAX_PROTOTYPE_DEPTH {
            if let ObjectClass::Proxy(proxy) = current.class() {
                current = proxy.target()?;
                continue;
            }
            let prototype = {
                let state = current.0.state.read();
                if state.properties.contains_key(&key) {
                    return Ok(true);
                }
                state.prototype.clone()
            };
            if current.virtual_property(&key).is_some() {
                return Ok(true);
            }
            match prototype {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }
        Err(HostError::type_error("Maximum prototype chain depth exceeded"))
    }

    /// `Object.prototype.hasOwnProperty`
    pub fn has_own_property(&self, key: impl Into<PropertyKey>) -> HostResult<bool> {
        let key = key.into();
        match self.class() {
            ObjectClass::Proxy(proxy) => proxy.target()?.has_own_property(key),
            _ => Ok(self.0.state.read().properties.contains_key(&key)
                || self.virtual_property(&key).is_some()),
        }
    }

    /// Whether `prototype` appears anywhere on this object's prototype chain
    pub fn instance_of(&self, prototype: &Object) -> HostResult<bool> {
        let mut cursor = self.prototype_of()?;
        let mut depth = 0;
        while let Some(obj) = cursor {
            if obj.ptr_eq(prototype) {
                return Ok(true);
            }
            depth += 1;
            if depth > MAX_PROTOTYPE_DEPTH {
                return Err(HostError::type_error("Maximum prototype chain depth exceeded"));
            }
            cursor = obj.prototype_of()?;
        }
        Ok(false)
    }

    /// Whether the object has a `[[Call]]` internal method
    pub fn is_callable(&self) -> bool {
        match self.class() {
            ObjectClass::Function(_) => true,
            ObjectClass::Proxy(proxy) => proxy.callable,
            _ => false,
        }
    }

    /// `Array.isArray`; looks through proxies
    pub fn is_array(&self) -> HostResult<bool> {
        match self.class() {
            ObjectClass::Array(_) => Ok(true),
            ObjectClass::Proxy(proxy) => proxy.target()?.is_array(),
            _ => Ok(false),
        }
    }

    /// Whether this is a proxy exotic object
    pub fn is_proxy(&self) -> bool {
        matches!(self.class(), ObjectClass::Proxy(_))
    }

    /// Revoke a proxy. Returns false if this is not a proxy.
    pub fn revoke(&self) -> bool {
        match self.class() {
            ObjectClass::Proxy(proxy) => {
                proxy.revoke();
                true
            }
            _ => false,
        }
    }

    /// `Object.prototype.toString`: `[object Tag]`
    ///
    /// The builtin tag comes from the internal class; a string-valued
    /// `Symbol.toStringTag` anywhere on the chain overrides it.
    pub fn class_string(&self) -> HostResult<String> {
        let builtin = self.builtin_tag()?;
        match self.get(Symbol::to_string_tag())? {
            Value::String(tag) => Ok(format!("[object {}]", tag)),
            _ => Ok(format!("[object {}]", builtin)),
        }
    }

    fn builtin_tag(&self) -> HostResult<&'static str> {
        if self.is_array()? {
            return Ok("Array");
        }
        Ok(match self.class() {
            ObjectClass::Arguments(_) => "Arguments",
            ObjectClass::Function(_) => "Function",
            ObjectClass::Proxy(proxy) if proxy.callable => "Function",
            ObjectClass::Error { .. } => "Error",
            ObjectClass::Boolean(_) => "Boolean",
            ObjectClass::Number(_) => "Number",
            ObjectClass::String(_) => "String",
            ObjectClass::Date(_) => "Date",
            ObjectClass::RegExp { .. } => "RegExp",
            _ => "Object",
        })
    }

    /// `Function.prototype.toString`
    pub fn function_source(&self) -> HostResult<String> {
        const NOT_A_FUNCTION: &str =
            "Function.prototype.toString requires that 'this' be a Function";
        match self.class() {
            ObjectClass::Function(data) => match &data.source {
                FunctionSource::Text(text) => Ok(text.clone()),
                FunctionSource::Native => Ok(format!("function {}() {{ [native code] }}", data.name)),
                FunctionSource::Unavailable => Err(HostError::type_error(NOT_A_FUNCTION)),
            },
            ObjectClass::Proxy(proxy) if proxy.callable => {
                proxy.target()?;
                Ok("function () { [native code] }".to_string())
            }
            _ => Err(HostError::type_error(NOT_A_FUNCTION)),
        }
    }

    /// Function slots, if this is a function object
    pub fn function_data(&self) -> Option<&FunctionData> {
        match self.class() {
            ObjectClass::Function(data) => Some(data),
            _ => None,
        }
    }

    /// `ArrayBuffer.isView`
    pub fn is_array_buffer_view(&self) -> bool {
        matches!(
            self.class(),
            ObjectClass::TypedArray { .. } | ObjectClass::DataView { .. }
        )
    }

    /// Whether the object has DataView internal slots
    pub fn is_data_view(&self) -> bool {
        matches!(self.class(), ObjectClass::DataView { .. })
    }

    /// Element kind of a typed array
    pub fn typed_array_kind(&self) -> Option<TypedArrayKind> {
        match self.class() {
            ObjectClass::TypedArray { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Element count of an array or arguments object
    pub fn array_length(&self) -> Option<usize> {
        match self.class() {
            ObjectClass::Array(elements) | ObjectClass::Arguments(elements) => Some(elements.len()),
            _ => None,
        }
    }

    /// Entry count of a Map or Set
    pub fn collection_size(&self) -> Option<usize> {
        match self.class() {
            ObjectClass::Map(entries) => Some(entries.len()),
            ObjectClass::Set(values) => Some(values.len()),
            _ => None,
        }
    }

    /// `byteLength` of a buffer or buffer view
    pub fn byte_length(&self) -> Option<usize> {
        match self.class() {
            ObjectClass::ArrayBuffer { byte_length }
            | ObjectClass::SharedArrayBuffer { byte_length }
            | ObjectClass::DataView { byte_length, .. } => Some(*byte_length),
            ObjectClass::TypedArray { kind, length, .. } => {
                Some(length * kind.bytes_per_element())
            }
            _ => None,
        }
    }

    /// Element count of a typed array
    pub fn typed_length(&self) -> Option<usize> {
        match self.class() {
            ObjectClass::TypedArray { length, .. } => Some(*length),
            _ => None,
        }
    }

    /// Elements of an array or arguments object, seen through proxies
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self.class() {
            ObjectClass::Array(elements) | ObjectClass::Arguments(elements) => {
                Some(elements.clone())
            }
            ObjectClass::Proxy(proxy) => proxy.target().ok()?.elements(),
            _ => None,
        }
    }

    /// Key/value pairs of a Map in insertion order, seen through proxies
    pub fn map_entries(&self) -> Option<Vec<(Value, Value)>> {
        match self.class() {
            ObjectClass::Map(entries) => Some(entries.clone()),
            ObjectClass::Proxy(proxy) => proxy.target().ok()?.map_entries(),
            _ => None,
        }
    }

    /// Values of a Set in insertion order, seen through proxies
    pub fn set_values(&self) -> Option<Vec<Value>> {
        match self.class() {
            ObjectClass::Set(values) => Some(values.clone()),
            ObjectClass::Proxy(proxy) => proxy.target().ok()?.set_values(),
            _ => None,
        }
    }

    /// Time value of a Date in milliseconds since the epoch
    pub fn time_value(&self) -> Option<f64> {
        match self.class() {
            ObjectClass::Date(time) => Some(*time),
            _ => None,
        }
    }

    /// Properties backed by internal slots rather than the property table.
    fn virtual_property(&self, key: &PropertyKey) -> Option<Value> {
        let PropertyKey::String(name) = key else {
            return None;
        };
        match (self.class(), name.as_str()) {
            (ObjectClass::Array(_) | ObjectClass::Arguments(_), "length") => {
                self.array_length().map(Value::from)
            }
            (ObjectClass::Map(_) | ObjectClass::Set(_), "size") => {
                self.collection_size().map(Value::from)
            }
            (ObjectClass::TypedArray { .. }, "length") => self.typed_length().map(Value::from),
            (
                ObjectClass::ArrayBuffer { .. }
                | ObjectClass::SharedArrayBuffer { .. }
                | ObjectClass::DataView { .. }
                | ObjectClass::TypedArray { .. },
                "byteLength",
            ) => self.byte_length().map(Value::from),
            (ObjectClass::Function(data), "name") => Some(Value::from(data.name.as_str())),
            (ObjectClass::Error { name, .. }, "name") => Some(Value::from(name.as_str())),
            (ObjectClass::Error { message, .. }, "message") => Some(Value::from(message.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &format_args!("{:#x}", self.identity()))
            .field("class", self.class())
            .finish()
    }
}

/// Renders the builtin class string without consulting user getters.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[object {}]", self.builtin_tag().unwrap_or("Object"))
    }
}

/// Weak handle to an object.
///
/// Holding a `WeakObject` never keeps the object alive, but it does pin the
/// allocation, so an address compared through [`WeakObject::refers_to`] can
/// never be recycled for a different object while the handle exists.
#[derive(Clone)]
pub struct WeakObject(Weak<ObjectCell>);

impl WeakObject {
    /// Upgrade to a strong handle if the object is still alive
    pub fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }

    /// Whether the object is still reachable
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Whether this handle points at `object`
    pub fn refers_to(&self, object: &Object) -> bool {
        std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&object.0))
    }
}

impl fmt::Debug for WeakObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObject")
            .field("alive", &self.is_alive())
            .finish()
    }
}
