//! Unit tests for Realm construction and factories

use host_value::{FunctionKind, HostFlavor, Realm, Symbol, TypedArrayKind, Value};

#[cfg(test)]
mod realm_flavor_tests {
    use super::*;

    #[test]
    fn test_default_realm_is_bare() {
        let realm = Realm::new();
        assert_eq!(realm.flavor(), HostFlavor::Bare);
        assert!(realm.intrinsics().buffer_prototype.is_none());
        assert!(realm.document().is_none());
        assert_eq!(realm.global().class_string().unwrap(), "[object Object]");
    }

    #[test]
    fn test_node_realm_global_tag() {
        let realm = Realm::node();
        assert_eq!(realm.global().class_string().unwrap(), "[object global]");
        assert!(realm.intrinsics().buffer_prototype.is_some());
    }

    #[test]
    fn test_browser_text_node() {
        let realm = Realm::browser();
        let text = realm.new_text_node("hi").unwrap();
        let node_proto = realm.intrinsics().node_prototype.clone().unwrap();
        let element_proto = realm.intrinsics().html_element_prototype.clone().unwrap();
        assert!(text.instance_of(&node_proto).unwrap());
        assert!(!text.instance_of(&element_proto).unwrap());
    }

    #[test]
    fn test_global_aliases_contain_global() {
        let realm = Realm::browser();
        assert!(realm
            .global_aliases()
            .iter()
            .any(|alias| alias.ptr_eq(realm.global())));
    }

    #[test]
    fn test_realms_do_not_share_intrinsics() {
        let a = Realm::new();
        let b = Realm::new();
        assert!(!a
            .intrinsics()
            .map_prototype
            .ptr_eq(&b.intrinsics().map_prototype));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}

#[cfg(test)]
mod realm_factory_tests {
    use super::*;

    #[test]
    fn test_arguments_callee_throws_but_is_present() {
        let realm = Realm::new();
        let args = realm.new_arguments(vec![Value::from(1)]);
        assert!(args.has_property("callee").unwrap());
        assert!(args.get("callee").is_err());
        assert_eq!(args.get("length").unwrap(), Value::from(1));
    }

    #[test]
    fn test_sloppy_arguments_callee_is_readable() {
        let realm = Realm::new();
        let f = realm.new_native_function("f");
        let args = realm.new_sloppy_arguments(vec![], &f);
        assert_eq!(args.get("callee").unwrap(), Value::from(f));
    }

    #[test]
    fn test_iterables() {
        let realm = Realm::new();
        let arr = realm.new_array(vec![]);
        assert!(arr.get(Symbol::iterator()).unwrap().is_callable());
        let map = realm.new_map(vec![]);
        assert!(map.get(Symbol::iterator()).unwrap().is_callable());
        let obj = realm.new_object();
        assert_eq!(obj.get(Symbol::iterator()).unwrap(), Value::Undefined);
    }

    #[test]
    fn test_promise_is_thenable() {
        let realm = Realm::new();
        let promise = realm.new_promise();
        assert!(promise.get("then").unwrap().is_callable());
    }

    #[test]
    fn test_typed_array_constructor_names() {
        let realm = Realm::new();
        for kind in TypedArrayKind::ALL {
            let array = realm.new_typed_array(kind, 1);
            let ctor = array.get("constructor").unwrap();
            let name = ctor.as_object().unwrap().get("name").unwrap();
            assert_eq!(name, Value::from(kind.name()));
        }
    }

    #[test]
    fn test_class_instances() {
        let realm = Realm::new();
        let class = realm.new_class("Point");
        let point = class.instantiate();
        let ctor = point.get("constructor").unwrap();
        assert!(ctor.as_object().unwrap().ptr_eq(&class.constructor));
        assert_eq!(
            class.constructor.function_data().map(|d| d.kind),
            Some(FunctionKind::Class)
        );
    }

    #[test]
    fn test_data_view_requires_buffer() {
        let realm = Realm::new();
        assert!(realm.new_data_view(&realm.new_object()).is_err());
        let shared = realm.new_shared_array_buffer(4).unwrap();
        assert!(realm.new_data_view(&shared).is_ok());
    }
}
