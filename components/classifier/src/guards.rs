//! Type guards built on [`Classifier::classify`].

use host_value::Value;

use crate::classifier::Classifier;
use crate::error::GuardError;

/// Whether `value` classifies as `expected`
///
/// # Examples
///
/// ```
/// use classifier::{guards, Classifier};
/// use host_value::{Realm, Value};
///
/// let realm = Realm::new();
/// let classifier = Classifier::new(&realm);
/// assert!(guards::is_type(&classifier, &Value::from(1.5), "number"));
/// assert!(guards::assert_type(&classifier, &Value::Null, "object").is_err());
/// ```
pub fn is_type(classifier: &Classifier, value: &Value, expected: &str) -> bool {
    classifier.classify(value) == expected
}

/// Fail with [`GuardError::TypeMismatch`] unless `value` classifies as `expected`
pub fn assert_type(classifier: &Classifier, value: &Value, expected: &str) -> Result<(), GuardError> {
    let actual = classifier.classify(value);
    if actual == expected {
        Ok(())
    } else {
        Err(GuardError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// `value` if it classifies as `expected`, otherwise `default`
pub fn ensure_type(classifier: &Classifier, value: Value, expected: &str, default: Value) -> Value {
    if is_type(classifier, &value, expected) {
        value
    } else {
        default
    }
}

/// Whether `value` classifies as any of `candidates`
pub fn is_one_of(classifier: &Classifier, value: &Value, candidates: &[&str]) -> bool {
    let actual = classifier.classify(value);
    candidates.iter().any(|candidate| actual == *candidate)
}
