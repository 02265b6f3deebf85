//! Unit tests for HostError

use host_value::{HostError, HostResult};

#[cfg(test)]
mod host_error_tests {
    use super::*;

    #[test]
    fn test_type_error_display() {
        let error = HostError::type_error("Cannot convert undefined or null to object");
        assert_eq!(
            error.to_string(),
            "TypeError: Cannot convert undefined or null to object"
        );
    }

    #[test]
    fn test_thrown_display() {
        let error = HostError::thrown("boom");
        assert_eq!(error.to_string(), "Uncaught boom");
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&HostError::thrown("x"));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn inner() -> HostResult<u32> {
            Err(HostError::type_error("nope"))
        }
        fn outer() -> HostResult<u32> {
            let value = inner()?;
            Ok(value + 1)
        }
        assert_eq!(outer(), Err(HostError::type_error("nope")));
    }
}
