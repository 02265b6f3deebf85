//! Unit tests for the tag vocabulary and internal tag table

use classifier::{lookup_internal_tag, BuiltinType, TypeCategory, TypeTag, INTERNAL_TAG_TABLE};
use std::collections::HashSet;

#[cfg(test)]
mod vocabulary_tests {
    use super::*;

    #[test]
    fn test_vocabulary_names_are_lowercase_and_unique() {
        let names: HashSet<&str> = BuiltinType::ALL.iter().map(|b| b.as_str()).collect();
        assert_eq!(names.len(), BuiltinType::ALL.len());
        for name in names {
            assert_eq!(name, name.to_lowercase());
        }
    }

    #[test]
    fn test_every_table_value_is_in_vocabulary() {
        for (class_string, builtin) in INTERNAL_TAG_TABLE {
            assert!(class_string.starts_with("[object "));
            assert!(BuiltinType::ALL.contains(builtin));
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup_internal_tag("[object Map]"), Some(BuiltinType::Map));
        assert_eq!(
            lookup_internal_tag("[object HTMLDocument]"),
            Some(BuiltinType::Document)
        );
        assert_eq!(lookup_internal_tag("[object HTMLDivElement]"), None);
        assert_eq!(lookup_internal_tag("[object map]"), None);
    }

    #[test]
    fn test_primitive_flags() {
        let primitives: Vec<_> = BuiltinType::ALL
            .into_iter()
            .filter(|b| b.is_primitive())
            .collect();
        assert_eq!(primitives.len(), 7);
        assert!(primitives
            .iter()
            .all(|b| b.category() == TypeCategory::Primitive));
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&TypeCategory::TypedArray).unwrap();
        assert_eq!(json, "\"typedarray\"");
        assert_eq!(TypeCategory::Dom.to_string(), "dom");
    }
}

#[cfg(test)]
mod type_tag_tests {
    use super::*;

    #[test]
    fn test_builtin_and_custom_spellings_are_equal() {
        assert_eq!(TypeTag::Custom("map".into()), TypeTag::Builtin(BuiltinType::Map));
        assert_eq!(TypeTag::from("email"), "email");
        assert_eq!("email", TypeTag::from("email"));
    }

    #[test]
    fn test_hash_matches_string() {
        let mut tags = HashSet::new();
        tags.insert(TypeTag::from(BuiltinType::Set));
        assert!(tags.contains("set"));
        assert!(tags.contains(&TypeTag::Custom("set".into())));
    }

    #[test]
    fn test_generic_object() {
        assert!(TypeTag::from("object").is_generic_object());
        assert!(!TypeTag::from("widget").is_generic_object());
        assert_eq!(TypeTag::from("widget").builtin(), None);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&TypeTag::from(BuiltinType::Int32Array)).unwrap();
        assert_eq!(json, "\"int32array\"");
    }
}
