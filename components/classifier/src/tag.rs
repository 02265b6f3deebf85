//! Type tag vocabulary and the internal tag table.
//!
//! [`BuiltinType`] is the closed vocabulary of canonical type names.
//! [`TypeTag`] is what classification returns: a builtin name or a custom
//! lowercase string produced by user rules or the constructor-name fallback.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Serialize, Serializer};

/// Canonical built-in type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinType {
    // Primitives
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
    /// `symbol`
    Symbol,
    /// `bigint`
    BigInt,
    // Objects
    /// `object`
    Object,
    /// `array`
    Array,
    /// `function`
    Function,
    /// `date`
    Date,
    /// `regexp`
    RegExp,
    /// `error`
    Error,
    // Collections
    /// `map`
    Map,
    /// `set`
    Set,
    /// `weakmap`
    WeakMap,
    /// `weakset`
    WeakSet,
    // Typed arrays
    /// `int8array`
    Int8Array,
    /// `uint8array`
    Uint8Array,
    /// `uint8clampedarray`
    Uint8ClampedArray,
    /// `int16array`
    Int16Array,
    /// `uint16array`
    Uint16Array,
    /// `int32array`
    Int32Array,
    /// `uint32array`
    Uint32Array,
    /// `float32array`
    Float32Array,
    /// `float64array`
    Float64Array,
    /// `bigint64array`
    BigInt64Array,
    /// `biguint64array`
    BigUint64Array,
    // Modern
    /// `promise`
    Promise,
    /// `generatorfunction`
    GeneratorFunction,
    /// `asyncfunction`
    AsyncFunction,
    /// `asyncgeneratorfunction`
    AsyncGeneratorFunction,
    /// `proxy`
    Proxy,
    /// `dataview`
    DataView,
    /// `arraybuffer`
    ArrayBuffer,
    /// `sharedarraybuffer`
    SharedArrayBuffer,
    // Host integration
    /// `buffer`
    Buffer,
    /// `stream`
    Stream,
    /// `eventemitter`
    EventEmitter,
    /// `element`
    Element,
    /// `node`
    Node,
    /// `window`
    Window,
    /// `document`
    Document,
    // Special
    /// `arguments`
    Arguments,
    /// `global`
    Global,
}

/// Coarse grouping of the builtin vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    /// The seven primitive kinds
    Primitive,
    /// Plain objects, arrays, functions, dates, regexps, errors
    Object,
    /// Map, Set and their weak variants
    Collection,
    /// The eleven typed array kinds
    TypedArray,
    /// Promises, special functions, proxies, buffers and views
    Modern,
    /// Node.js integration types
    Node,
    /// Browser DOM types
    Dom,
    /// Arguments, the global object, and anything outside the vocabulary
    Special,
}

impl TypeCategory {
    /// Lowercase category name
    pub fn as_str(self) -> &'static str {
        match self {
            TypeCategory::Primitive => "primitive",
            TypeCategory::Object => "object",
            TypeCategory::Collection => "collection",
            TypeCategory::TypedArray => "typedarray",
            TypeCategory::Modern => "modern",
            TypeCategory::Node => "node",
            TypeCategory::Dom => "dom",
            TypeCategory::Special => "special",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BuiltinType {
    /// Every builtin type, in vocabulary order
    pub const ALL: [BuiltinType; 45] = [
        BuiltinType::Undefined,
        BuiltinType::Null,
        BuiltinType::Boolean,
        BuiltinType::Number,
        BuiltinType::String,
        BuiltinType::Symbol,
        BuiltinType::BigInt,
        BuiltinType::Object,
        BuiltinType::Array,
        BuiltinType::Function,
        BuiltinType::Date,
        BuiltinType::RegExp,
        BuiltinType::Error,
        BuiltinType::Map,
        BuiltinType::Set,
        BuiltinType::WeakMap,
        BuiltinType::WeakSet,
        BuiltinType::Int8Array,
        BuiltinType::Uint8Array,
        BuiltinType::Uint8ClampedArray,
        BuiltinType::Int16Array,
        BuiltinType::Uint16Array,
        BuiltinType::Int32Array,
        BuiltinType::Uint32Array,
        BuiltinType::Float32Array,
        BuiltinType::Float64Array,
        BuiltinType::BigInt64Array,
        BuiltinType::BigUint64Array,
        BuiltinType::Promise,
        BuiltinType::GeneratorFunction,
        BuiltinType::AsyncFunction,
        BuiltinType::AsyncGeneratorFunction,
        BuiltinType::Proxy,
        BuiltinType::DataView,
        BuiltinType::ArrayBuffer,
        BuiltinType::SharedArrayBuffer,
        BuiltinType::Buffer,
        BuiltinType::Stream,
        BuiltinType::EventEmitter,
        BuiltinType::Element,
        BuiltinType::Node,
        BuiltinType::Window,
        BuiltinType::Document,
        BuiltinType::Arguments,
        BuiltinType::Global,
    ];

    /// The canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Undefined => "undefined",
            BuiltinType::Null => "null",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Number => "number",
            BuiltinType::String => "string",
            BuiltinType::Symbol => "symbol",
            BuiltinType::BigInt => "bigint",
            BuiltinType::Object => "object",
            BuiltinType::Array => "array",
            BuiltinType::Function => "function",
            BuiltinType::Date => "date",
            BuiltinType::RegExp => "regexp",
            BuiltinType::Error => "error",
            BuiltinType::Map => "map",
            BuiltinType::Set => "set",
            BuiltinType::WeakMap => "weakmap",
            BuiltinType::WeakSet => "weakset",
            BuiltinType::Int8Array => "int8array",
            BuiltinType::Uint8Array => "uint8array",
            BuiltinType::Uint8ClampedArray => "uint8clampedarray",
            BuiltinType::Int16Array => "int16array",
            BuiltinType::Uint16Array => "uint16array",
            BuiltinType::Int32Array => "int32array",
            BuiltinType::Uint32Array => "uint32array",
            BuiltinType::Float32Array => "float32array",
            BuiltinType::Float64Array => "float64array",
            BuiltinType::BigInt64Array => "bigint64array",
            BuiltinType::BigUint64Array => "biguint64array",
            BuiltinType::Promise => "promise",
            BuiltinType::GeneratorFunction => "generatorfunction",
            BuiltinType::AsyncFunction => "asyncfunction",
            BuiltinType::AsyncGeneratorFunction => "asyncgeneratorfunction",
            BuiltinType::Proxy => "proxy",
            BuiltinType::DataView => "dataview",
            BuiltinType::ArrayBuffer => "arraybuffer",
            BuiltinType::SharedArrayBuffer => "sharedarraybuffer",
            BuiltinType::Buffer => "buffer",
            BuiltinType::Stream => "stream",
            BuiltinType::EventEmitter => "eventemitter",
            BuiltinType::Element => "element",
            BuiltinType::Node => "node",
            BuiltinType::Window => "window",
            BuiltinType::Document => "document",
            BuiltinType::Arguments => "arguments",
            BuiltinType::Global => "global",
        }
    }

    /// Look up a builtin by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// The category this type belongs to
    pub fn category(self) -> TypeCategory {
        use BuiltinType::*;
        match self {
            Undefined | Null | Boolean | Number | String | Symbol | BigInt => {
                TypeCategory::Primitive
            }
            Object | Array | Function | Date | RegExp | Error => TypeCategory::Object,
            Map | Set | WeakMap | WeakSet => TypeCategory::Collection,
            Int8Array | Uint8Array | Uint8ClampedArray | Int16Array | Uint16Array
            | Int32Array | Uint32Array | Float32Array | Float64Array | BigInt64Array
            | BigUint64Array => TypeCategory::TypedArray,
            Promise | GeneratorFunction | AsyncFunction | AsyncGeneratorFunction | Proxy
            | DataView | ArrayBuffer | SharedArrayBuffer => TypeCategory::Modern,
            Buffer | Stream | EventEmitter => TypeCategory::Node,
            Element | Node | Window | Document => TypeCategory::Dom,
            Arguments | Global => TypeCategory::Special,
        }
    }

    /// Whether this is one of the seven primitive kinds
    pub fn is_primitive(self) -> bool {
        self.category() == TypeCategory::Primitive
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static BY_NAME: LazyLock<HashMap<&'static str, BuiltinType>> = LazyLock::new(|| {
    BuiltinType::ALL
        .iter()
        .map(|builtin| (builtin.as_str(), *builtin))
        .collect()
});

/// A classification result.
///
/// Builtin and custom tags with the same spelling are equal, and every tag
/// compares equal to its lowercase string.
///
/// # Examples
///
/// ```
/// use classifier::{BuiltinType, TypeTag};
///
/// assert_eq!(TypeTag::from(BuiltinType::Map), "map");
/// assert_eq!(TypeTag::from_name("map"), TypeTag::Builtin(BuiltinType::Map));
/// assert!(!TypeTag::from_name("email").is_builtin());
/// ```
#[derive(Debug, Clone)]
pub enum TypeTag {
    /// A member of the closed vocabulary
    Builtin(BuiltinType),
    /// Any other tag
    Custom(Arc<str>),
}

impl TypeTag {
    /// Build a tag from a name, normalizing vocabulary names to `Builtin`
    pub fn from_name(name: &str) -> Self {
        match BuiltinType::from_name(name) {
            Some(builtin) => TypeTag::Builtin(builtin),
            None => TypeTag::Custom(Arc::from(name)),
        }
    }

    /// The tag as a string
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Builtin(builtin) => builtin.as_str(),
            TypeTag::Custom(name) => name,
        }
    }

    /// The builtin type, if this tag is in the vocabulary
    pub fn builtin(&self) -> Option<BuiltinType> {
        match self {
            TypeTag::Builtin(builtin) => Some(*builtin),
            TypeTag::Custom(name) => BuiltinType::from_name(name),
        }
    }

    /// Whether the tag is in the closed vocabulary
    pub fn is_builtin(&self) -> bool {
        self.builtin().is_some()
    }

    /// Whether this is the generic `object` tag
    pub fn is_generic_object(&self) -> bool {
        self.builtin() == Some(BuiltinType::Object)
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TypeTag {}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for TypeTag {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TypeTag> for &str {
    fn eq(&self, other: &TypeTag) -> bool {
        *self == other.as_str()
    }
}

impl From<BuiltinType> for TypeTag {
    fn from(builtin: BuiltinType) -> Self {
        TypeTag::Builtin(builtin)
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        TypeTag::from_name(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        TypeTag::from_name(&name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Host class strings and the builtin they identify.
///
/// Every value is a member of the vocabulary and every key is unique.
pub const INTERNAL_TAG_TABLE: &[(&str, BuiltinType)] = &[
    ("[object Arguments]", BuiltinType::Arguments),
    ("[object Array]", BuiltinType::Array),
    ("[object ArrayBuffer]", BuiltinType::ArrayBuffer),
    ("[object AsyncFunction]", BuiltinType::AsyncFunction),
    ("[object AsyncGeneratorFunction]", BuiltinType::AsyncGeneratorFunction),
    ("[object BigInt]", BuiltinType::BigInt),
    ("[object BigInt64Array]", BuiltinType::BigInt64Array),
    ("[object BigUint64Array]", BuiltinType::BigUint64Array),
    ("[object Boolean]", BuiltinType::Boolean),
    ("[object DataView]", BuiltinType::DataView),
    ("[object Date]", BuiltinType::Date),
    ("[object Error]", BuiltinType::Error),
    ("[object Float32Array]", BuiltinType::Float32Array),
    ("[object Float64Array]", BuiltinType::Float64Array),
    ("[object Function]", BuiltinType::Function),
    ("[object GeneratorFunction]", BuiltinType::GeneratorFunction),
    ("[object Int8Array]", BuiltinType::Int8Array),
    ("[object Int16Array]", BuiltinType::Int16Array),
    ("[object Int32Array]", BuiltinType::Int32Array),
    ("[object Map]", BuiltinType::Map),
    ("[object Number]", BuiltinType::Number),
    ("[object Object]", BuiltinType::Object),
    ("[object Promise]", BuiltinType::Promise),
    ("[object Proxy]", BuiltinType::Proxy),
    ("[object RegExp]", BuiltinType::RegExp),
    ("[object Set]", BuiltinType::Set),
    ("[object SharedArrayBuffer]", BuiltinType::SharedArrayBuffer),
    ("[object String]", BuiltinType::String),
    ("[object Symbol]", BuiltinType::Symbol),
    ("[object Uint8Array]", BuiltinType::Uint8Array),
    ("[object Uint8ClampedArray]", BuiltinType::Uint8ClampedArray),
    ("[object Uint16Array]", BuiltinType::Uint16Array),
    ("[object Uint32Array]", BuiltinType::Uint32Array),
    ("[object WeakMap]", BuiltinType::WeakMap),
    ("[object WeakSet]", BuiltinType::WeakSet),
    ("[object Window]", BuiltinType::Window),
    ("[object HTMLDocument]", BuiltinType::Document),
    ("[object Document]", BuiltinType::Document),
    ("[object Null]", BuiltinType::Null),
    ("[object Undefined]", BuiltinType::Undefined),
];

static TAG_LOOKUP: LazyLock<HashMap<&'static str, BuiltinType>> =
    LazyLock::new(|| INTERNAL_TAG_TABLE.iter().copied().collect());

/// Look up a host class string such as `"[object Map]"`
pub fn lookup_internal_tag(class_string: &str) -> Option<BuiltinType> {
    TAG_LOOKUP.get(class_string).copied()
}
