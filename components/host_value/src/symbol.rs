//! JavaScript Symbol primitive
//!
//! Symbols are unique, immutable primitive values that can be used as property keys.
//! This module implements:
//! - `Symbol()` for creating unique symbols
//! - `Symbol.for()` global registry for shared symbols
//! - The well-known symbols the host consults while reflecting on objects
//!   (`Symbol.iterator`, `Symbol.asyncIterator`, `Symbol.toStringTag`)

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use parking_lot::Mutex;

/// Global counter for generating unique symbol IDs
static SYMBOL_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Global registry for Symbol.for()
static SYMBOL_REGISTRY: LazyLock<Mutex<HashMap<String, Symbol>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Well-known symbol storage
static WELL_KNOWN_SYMBOLS: LazyLock<WellKnownSymbols> = LazyLock::new(|| WellKnownSymbols {
    iterator: Symbol::new(Some("Symbol.iterator")),
    async_iterator: Symbol::new(Some("Symbol.asyncIterator")),
    to_string_tag: Symbol::new(Some("Symbol.toStringTag")),
});

struct WellKnownSymbols {
    iterator: Symbol,
    async_iterator: Symbol,
    to_string_tag: Symbol,
}

/// A JavaScript Symbol value
///
/// Symbols compare by identity: two symbols with the same description are
/// still different unless they came from the same `Symbol.for` key.
///
/// # Examples
///
/// ```
/// use host_value::Symbol;
///
/// let a = Symbol::new(Some("tag"));
/// let b = Symbol::new(Some("tag"));
/// assert_ne!(a, b);
/// assert_eq!(Symbol::for_key("app"), Symbol::for_key("app"));
/// assert_eq!(a.to_string(), "Symbol(tag)");
/// ```
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Option<String>,
}

impl Symbol {
    /// Create a new unique symbol with an optional description
    pub fn new(description: Option<&str>) -> Self {
        let id = SYMBOL_COUNTER.fetch_add(1, Ordering::SeqCst);
        Symbol {
            id,
            description: description.map(str::to_string),
        }
    }

    /// `Symbol.for(key)`: look up or create a registry-shared symbol
    pub fn for_key(key: &str) -> Self {
        let mut registry = SYMBOL_REGISTRY.lock();
        registry
            .entry(key.to_string())
            .or_insert_with(|| Symbol::new(Some(key)))
            .clone()
    }

    /// `Symbol.iterator`
    pub fn iterator() -> Self {
        WELL_KNOWN_SYMBOLS.iterator.clone()
    }

    /// `Symbol.asyncIterator`
    pub fn async_iterator() -> Self {
        WELL_KNOWN_SYMBOLS.async_iterator.clone()
    }

    /// `Symbol.toStringTag`
    pub fn to_string_tag() -> Self {
        WELL_KNOWN_SYMBOLS.to_string_tag.clone()
    }

    /// Get the unique ID of this symbol
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the description of this symbol
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Renders `Symbol(description)` or `Symbol()` like `Symbol.prototype.toString`
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "Symbol({})", desc),
            None => write!(f, "Symbol()"),
        }
    }
}
