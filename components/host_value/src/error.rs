//! Reflective failures raised by the host.
//!
//! Every reflective operation on an [`Object`](crate::Object) (property reads,
//! prototype walks, source retrieval) can fail the way a JavaScript engine
//! throws: hostile getters, revoked proxies and non-serializable functions.

use thiserror::Error;

/// An exception thrown by the host while inspecting a value.
///
/// # Examples
///
/// ```
/// use host_value::HostError;
///
/// let error = HostError::type_error("Cannot perform 'get' on a proxy that has been revoked");
/// assert_eq!(
///     error.to_string(),
///     "TypeError: Cannot perform 'get' on a proxy that has been revoked"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// A TypeError raised by the engine itself
    #[error("TypeError: {0}")]
    TypeError(String),
    /// A value thrown by user code (for example from a getter)
    #[error("Uncaught {0}")]
    Thrown(String),
}

impl HostError {
    /// Create a TypeError
    pub fn type_error(message: impl Into<String>) -> Self {
        HostError::TypeError(message.into())
    }

    /// Create an error carrying a user-thrown value
    pub fn thrown(message: impl Into<String>) -> Self {
        HostError::Thrown(message.into())
    }
}

/// Result type for reflective host operations
pub type HostResult<T> = Result<T, HostError>;
