//! Error types for registry mutation, guards and configuration.
//!
//! Classification itself never fails; these errors come only from the
//! operations that are documented to fail fast.

use thiserror::Error;

/// Misuse of an [`ExtensibleClassifier`](crate::ExtensibleClassifier) registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A plugin with this name is already installed
    #[error("Plugin \"{0}\" is already registered")]
    DuplicatePlugin(String),
    /// No plugin with this name is installed
    #[error("Plugin \"{0}\" is not registered")]
    UnknownPlugin(String),
    /// A rule with this name already exists
    #[error("Type \"{0}\" is already defined")]
    DuplicateType(String),
    /// No rule with this name exists
    #[error("Type \"{0}\" is not defined")]
    UnknownType(String),
}

/// A type assertion that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The value classified as `actual` instead of `expected`
    #[error("Expected type \"{expected}\" but got \"{actual}\"")]
    TypeMismatch {
        /// Requested tag
        expected: String,
        /// Tag the value actually has
        actual: String,
    },
}

/// Invalid classifier configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON
    #[error("invalid classifier config: {0}")]
    Json(#[from] serde_json::Error),
}
