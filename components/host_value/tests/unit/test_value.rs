//! Unit tests for Value and PropertyKey

use host_value::{PropertyKey, Realm, Symbol, Value};
use num_bigint::BigInt;

#[cfg(test)]
mod value_type_of_tests {
    use super::*;

    #[test]
    fn test_type_of_undefined() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
    }

    #[test]
    fn test_type_of_null_is_object() {
        assert_eq!(Value::Null.type_of(), "object");
    }

    #[test]
    fn test_type_of_bigint() {
        assert_eq!(Value::from(BigInt::from(10)).type_of(), "bigint");
    }

    #[test]
    fn test_type_of_function_objects() {
        let realm = Realm::new();
        let f = realm.new_native_function("f");
        assert_eq!(Value::from(f).type_of(), "function");
    }

    #[test]
    fn test_type_of_callable_proxy() {
        let realm = Realm::new();
        let f = realm.new_native_function("f");
        let proxy = realm.new_proxy(&f);
        assert_eq!(Value::from(proxy).type_of(), "function");
    }

    #[test]
    fn test_type_of_plain_object() {
        let realm = Realm::new();
        assert_eq!(Value::from(realm.new_object()).type_of(), "object");
    }
}

#[cfg(test)]
mod value_equality_tests {
    use super::*;

    #[test]
    fn test_objects_compare_by_identity() {
        let realm = Realm::new();
        let a = realm.new_object();
        let b = realm.new_object();
        assert_eq!(Value::from(&a), Value::from(&a));
        assert_ne!(Value::from(&a), Value::from(&b));
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
    }

    #[test]
    fn test_symbols_compare_by_identity() {
        let s = Symbol::new(Some("s"));
        assert_eq!(Value::from(s.clone()), Value::from(s));
        assert_ne!(
            Value::from(Symbol::new(Some("s"))),
            Value::from(Symbol::new(Some("s")))
        );
    }
}

#[cfg(test)]
mod value_accessor_tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(1).as_str(), None);
    }

    #[test]
    fn test_is_nullish() {
        assert!(Value::Undefined.is_nullish());
        assert!(Value::Null.is_nullish());
        assert!(!Value::from(0).is_nullish());
    }

    #[test]
    fn test_display_object_uses_builtin_tag() {
        let realm = Realm::new();
        let arr = realm.new_array(vec![]);
        assert_eq!(Value::from(arr).to_string(), "[object Array]");
    }

    #[test]
    fn test_property_key_display() {
        assert_eq!(PropertyKey::from("name").to_string(), "name");
        assert_eq!(
            PropertyKey::from(Symbol::iterator()).to_string(),
            "[Symbol(Symbol.iterator)]"
        );
    }
}
