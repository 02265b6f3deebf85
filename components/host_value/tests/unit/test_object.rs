//! Unit tests for Object reflection

use host_value::{
    FunctionData, FunctionKind, HostError, Object, ObjectClass, Property, Realm, Symbol,
    TypedArrayKind, Value,
};
use pretty_assertions::assert_eq;

#[cfg(test)]
mod property_access_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_own_property_shadows_prototype() {
        let proto = Object::ordinary(None);
        proto.set("x", 1);
        let obj = Object::ordinary(Some(&proto));
        obj.set("x", 2);
        assert_eq!(obj.get("x").unwrap(), Value::from(2));
        assert!(obj.delete("x"));
        assert_eq!(obj.get("x").unwrap(), Value::from(1));
    }

    #[test]
    fn test_own_keys_keep_insertion_order() {
        let obj = Object::ordinary(None);
        obj.set("b", 1).set("a", 2).set("c", 3);
        let keys: Vec<String> = obj.own_keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_throwing_getter_propagates() {
        let obj = Object::ordinary(None);
        obj.define_getter("bad", |_| Err(HostError::thrown("Error: hostile")));
        assert_eq!(obj.get("bad"), Err(HostError::thrown("Error: hostile")));
    }

    #[test]
    fn test_has_own_property_vs_inherited() {
        let realm = Realm::new();
        let obj = realm.new_object();
        obj.set("own", true);
        assert!(obj.has_own_property("own").unwrap());
        assert!(!obj.has_own_property("hasOwnProperty").unwrap());
        assert!(obj.has_property("hasOwnProperty").unwrap());
    }

    #[test]
    fn test_own_property_does_not_run_getter() {
        let obj = Object::ordinary(None);
        obj.define_getter("g", |_| Err(HostError::thrown("never")));
        assert!(matches!(obj.own_property("g"), Some(Property::Accessor(_))));
    }
}

#[cfg(test)]
mod class_string_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_string_tag_overrides_builtin_tag() {
        let obj = Object::ordinary(None);
        obj.set(Symbol::to_string_tag(), "Custom");
        assert_eq!(obj.class_string().unwrap(), "[object Custom]");
    }

    #[test]
    fn test_non_string_tag_is_ignored() {
        let obj = Object::new(ObjectClass::Date(0.0), None);
        obj.set(Symbol::to_string_tag(), 42);
        assert_eq!(obj.class_string().unwrap(), "[object Date]");
    }

    #[test]
    fn test_throwing_tag_getter_fails_class_string() {
        let obj = Object::ordinary(None);
        obj.define_getter(Symbol::to_string_tag(), |_| Err(HostError::thrown("tag")));
        assert!(obj.class_string().is_err());
    }

    #[test]
    fn test_boxed_primitive_tags() {
        let realm = Realm::new();
        let boxed = realm.new_boxed(&Value::from("s")).unwrap();
        assert_eq!(boxed.class_string().unwrap(), "[object String]");
        let boxed = realm.new_boxed(&Value::from(Symbol::new(None))).unwrap();
        assert_eq!(boxed.class_string().unwrap(), "[object Symbol]");
        assert!(realm.new_boxed(&Value::Null).is_err());
    }
}

#[cfg(test)]
mod function_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_text() {
        let realm = Realm::new();
        let f = realm.new_function(FunctionKind::Generator, "g", "function* g() {}");
        assert_eq!(f.function_source().unwrap(), "function* g() {}");
    }

    #[test]
    fn test_native_source() {
        let realm = Realm::new();
        let f = realm.new_native_function("push");
        assert_eq!(
            f.function_source().unwrap(),
            "function push() { [native code] }"
        );
    }

    #[test]
    fn test_unavailable_source_throws() {
        let realm = Realm::new();
        let f = realm.new_function_from(FunctionData::new("f", FunctionKind::Async).without_source());
        assert!(f.function_source().is_err());
        assert!(f.is_callable());
    }

    #[test]
    fn test_non_function_has_no_source() {
        assert!(Object::ordinary(None).function_source().is_err());
    }

    #[test]
    fn test_function_name_property() {
        let realm = Realm::new();
        let f = realm.new_native_function("handler");
        assert_eq!(f.get("name").unwrap(), Value::from("handler"));
    }
}

#[cfg(test)]
mod proxy_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_proxy_forwards_reads() {
        let realm = Realm::new();
        let target = realm.new_object();
        target.set("x", 1);
        let proxy = realm.new_proxy(&target);
        assert_eq!(proxy.get("x").unwrap(), Value::from(1));
        assert!(proxy.is_proxy());
        assert!(!target.is_proxy());
    }

    #[test]
    fn test_proxy_get_trap() {
        let realm = Realm::new();
        let target = realm.new_object();
        let proxy = realm.new_proxy_with_trap(&target, |_, key, _| Ok(Value::from(key.to_string())));
        assert_eq!(proxy.get("anything").unwrap(), Value::from("anything"));
    }

    #[test]
    fn test_proxy_prototype_is_target_prototype() {
        let realm = Realm::new();
        let map = realm.new_map(vec![]);
        let proxy = realm.new_proxy(&map);
        assert!(proxy
            .instance_of(&realm.intrinsics().map_prototype)
            .unwrap());
    }

    #[test]
    fn test_revoked_proxy_throws_everywhere() {
        let realm = Realm::new();
        let proxy = realm.new_proxy(&realm.new_object());
        proxy.revoke();
        assert!(proxy.get("x").is_err());
        assert!(proxy.has_property("x").is_err());
        assert!(proxy.prototype_of().is_err());
    }
}

#[cfg(test)]
mod slot_reader_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typed_array_slots() {
        let realm = Realm::new();
        let ints = realm.new_typed_array(TypedArrayKind::Float64, 3);
        assert_eq!(ints.typed_length(), Some(3));
        assert_eq!(ints.byte_length(), Some(24));
        assert_eq!(ints.get("byteLength").unwrap(), Value::from(24));
        assert!(ints.is_array_buffer_view());
        assert!(!ints.is_data_view());
    }

    #[test]
    fn test_data_view_is_view_but_not_typed_array() {
        let realm = Realm::new();
        let buffer = realm.new_array_buffer(8);
        let view = realm.new_data_view(&buffer).unwrap();
        assert!(view.is_array_buffer_view());
        assert!(view.is_data_view());
        assert_eq!(view.typed_array_kind(), None);
        assert_eq!(view.byte_length(), Some(8));
    }

    #[test]
    fn test_collection_sizes() {
        let realm = Realm::new();
        let map = realm.new_map(vec![(Value::from("a"), Value::from(1))]);
        let set = realm.new_set(vec![Value::from(1), Value::from(2)]);
        assert_eq!(map.collection_size(), Some(1));
        assert_eq!(set.get("size").unwrap(), Value::from(2));
    }

    #[test]
    fn test_slot_contents_through_proxy() {
        let realm = Realm::new();
        let array = realm.new_array(vec![Value::from(1), Value::from("x")]);
        let proxy = realm.new_proxy(&array);
        assert_eq!(proxy.elements(), Some(vec![Value::from(1), Value::from("x")]));
        proxy.revoke();
        assert_eq!(proxy.elements(), None);

        let map = realm.new_map(vec![(Value::from("k"), Value::Null)]);
        assert_eq!(map.map_entries(), Some(vec![(Value::from("k"), Value::Null)]));
        assert_eq!(map.set_values(), None);
        assert_eq!(realm.new_date(5.0).time_value(), Some(5.0));
        assert_eq!(realm.new_object().elements(), None);
    }
}
