//! Unit tests for detailed type reports

use classifier::{Classifier, DetailedTypeInfo, ExtensibleClassifier, TypeMetadata};
use host_value::{Realm, Symbol, TypedArrayKind, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_array_length_metadata(len in 0usize..64) {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let array = realm.new_array(vec![Value::Null; len]);
        let info = classifier.detailed_classify(&Value::from(array));
        prop_assert_eq!(info.metadata.and_then(|m| m.length), Some(len));
    }

    #[test]
    fn prop_collection_size_metadata(len in 0usize..32) {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let set = realm.new_set((0..len).map(Value::from).collect());
        let map = realm.new_map((0..len).map(|i| (Value::from(i), Value::Null)).collect());
        for collection in [set, map] {
            let info = classifier.detailed_classify(&Value::from(collection));
            prop_assert_eq!(info.metadata.and_then(|m| m.size), Some(len));
        }
    }

    #[test]
    fn prop_buffer_byte_length_metadata(len in 0usize..4096) {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let buffer = realm.new_array_buffer(len);
        let info = classifier.detailed_classify(&Value::from(buffer));
        prop_assert_eq!(info.metadata.and_then(|m| m.byte_length), Some(len));
    }
}

#[cfg(test)]
mod detailed_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_report_for_array() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let array = realm.new_array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let info = classifier.detailed_classify(&Value::from(array));
        assert_eq!(
            info,
            DetailedTypeInfo {
                type_tag: "array".into(),
                constructor_name: Some("Array".into()),
                prototype_constructor_name: Some("Array".into()),
                is_primitive: false,
                is_built_in: true,
                is_nullish: false,
                is_iterable: true,
                is_async: false,
                custom_tag: None,
                metadata: Some(TypeMetadata {
                    length: Some(3),
                    ..TypeMetadata::default()
                }),
            }
        );
    }

    #[test]
    fn test_node_buffer_metadata() {
        let realm = Realm::node();
        let classifier = Classifier::new(&realm);
        let buffer = realm.new_buffer(5).unwrap();
        let info = classifier.detailed_classify(&Value::from(buffer));
        assert_eq!(info.type_tag, "buffer");
        let metadata = info.metadata.unwrap();
        assert_eq!(metadata.length, Some(5));
        assert_eq!(metadata.byte_length, Some(5));
    }

    #[test]
    fn test_typed_array_custom_tag() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let bytes = realm.new_typed_array(TypedArrayKind::Uint8Clamped, 2);
        let info = classifier.detailed_classify(&Value::from(bytes));
        assert_eq!(info.custom_tag.as_deref(), Some("Uint8ClampedArray"));
        assert!(info.is_iterable);
    }

    #[test]
    fn test_custom_tags_are_not_built_in() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let widget = realm.new_class("Widget").instantiate();
        let info = classifier.detailed_classify(&Value::from(widget));
        assert_eq!(info.type_tag, "widget");
        assert!(!info.is_built_in);
        assert_eq!(info.constructor_name.as_deref(), Some("Widget"));

        let tagged = realm.new_object();
        tagged.set(Symbol::to_string_tag(), "Thing");
        let info = classifier.detailed_classify(&Value::from(tagged));
        assert_eq!(info.custom_tag.as_deref(), Some("Thing"));
        assert_eq!(info.type_tag, "thing");
    }

    #[test]
    fn test_extensible_base_reports() {
        let realm = Realm::new();
        let extensible = ExtensibleClassifier::new(&realm);
        let info = extensible
            .base()
            .detailed_classify(&Value::from(realm.new_promise()));
        assert!(info.is_async);
        assert_eq!(info.custom_tag.as_deref(), Some("Promise"));
    }
}
