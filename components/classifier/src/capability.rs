//! Structural capability sets.
//!
//! Duck-typed checks ("has a callable `pipe`") are expressed as a fixed list
//! of member requirements evaluated in order, stopping at the first miss.

use host_value::{Object, Value};

use crate::reflect;

/// What a member must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// `member in value`; never runs getters
    Present,
    /// `typeof value[member] === "function"`
    Callable,
}

/// A single member requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// Property name
    pub member: &'static str,
    /// Required shape
    pub requirement: Requirement,
}

impl Capability {
    /// Member must exist
    pub const fn present(member: &'static str) -> Self {
        Capability {
            member,
            requirement: Requirement::Present,
        }
    }

    /// Member must be callable
    pub const fn callable(member: &'static str) -> Self {
        Capability {
            member,
            requirement: Requirement::Callable,
        }
    }

    /// Whether `object` satisfies this requirement
    pub fn satisfied_by(&self, object: &Object) -> bool {
        match self.requirement {
            Requirement::Present => reflect::has(object, self.member),
            Requirement::Callable => reflect::has_callable(object, self.member),
        }
    }
}

/// An ordered list of member requirements.
///
/// # Examples
///
/// ```
/// use classifier::capability::STREAM;
/// use host_value::{Realm, Value};
///
/// let realm = Realm::new();
/// let stream = realm.new_object();
/// stream.set("pipe", realm.new_native_function("pipe"));
/// assert!(STREAM.matches(&Value::from(stream)));
/// assert!(!STREAM.matches(&Value::from(realm.new_object())));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapabilitySet {
    capabilities: &'static [Capability],
}

impl CapabilitySet {
    /// Build a set from a static requirement list
    pub const fn new(capabilities: &'static [Capability]) -> Self {
        CapabilitySet { capabilities }
    }

    /// Requirements in evaluation order
    pub fn capabilities(&self) -> &'static [Capability] {
        self.capabilities
    }

    /// Whether an object satisfies every requirement
    pub fn matches_object(&self, object: &Object) -> bool {
        self.capabilities.iter().all(|cap| cap.satisfied_by(object))
    }

    /// Whether a value is an object (or function) satisfying every requirement
    pub fn matches(&self, value: &Value) -> bool {
        value.as_object().is_some_and(|object| self.matches_object(object))
    }
}

/// Readable/writable stream: a callable `pipe`
pub const STREAM: CapabilitySet = CapabilitySet::new(&[Capability::callable("pipe")]);

/// Event emitter: callable `on`, `emit` and `removeListener`
pub const EVENT_EMITTER: CapabilitySet = CapabilitySet::new(&[
    Capability::callable("on"),
    Capability::callable("emit"),
    Capability::callable("removeListener"),
]);

/// Promise-like: a callable `then`
pub const THENABLE: CapabilitySet = CapabilitySet::new(&[Capability::callable("then")]);
