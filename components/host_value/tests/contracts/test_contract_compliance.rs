//! Contract compliance tests for host_value
//!
//! These tests pin the reflective behaviour the classifier relies on.

use host_value::{HostError, Object, Realm, Symbol, TypedArrayKind, Value};

#[cfg(test)]
mod reflection_contract_tests {
    use super::*;

    /// Contract: `in` never runs accessors
    #[test]
    fn test_has_property_is_getter_free() {
        let obj = Object::ordinary(None);
        obj.define_getter("x", |_| panic!("getter must not run"));
        assert!(obj.has_property("x").unwrap());
    }

    /// Contract: getters see the original receiver, not the holder
    #[test]
    fn test_getter_receiver_is_original_object() {
        let realm = Realm::new();
        let array = realm.new_typed_array(TypedArrayKind::Int16, 2);
        let tag = array.get(Symbol::to_string_tag()).unwrap();
        assert_eq!(tag, Value::from("Int16Array"));
        let tag = realm
            .intrinsics()
            .typed_array_prototype
            .get(Symbol::to_string_tag())
            .unwrap();
        assert_eq!(tag, Value::Undefined);
    }

    /// Contract: class strings come from internal slots, not prototypes
    #[test]
    fn test_class_string_uses_internal_slots() {
        let realm = Realm::new();
        let fake = realm.new_object_with_proto(Some(&realm.intrinsics().array_prototype));
        assert_eq!(fake.class_string().unwrap(), "[object Object]");
        assert!(!fake.is_array().unwrap());
    }

    /// Contract: reflective failures are values, never panics
    #[test]
    fn test_failures_are_host_errors() {
        let realm = Realm::new();
        let proxy = realm.new_proxy(&realm.new_array(vec![]));
        proxy.revoke();
        assert!(matches!(proxy.is_array(), Err(HostError::TypeError(_))));
    }

    /// Contract: identity is stable across handle clones
    #[test]
    fn test_identity_is_stable() {
        let obj = Object::ordinary(None);
        let clone = obj.clone();
        assert_eq!(obj.identity(), clone.identity());
        assert!(obj.ptr_eq(&clone));
    }
}
