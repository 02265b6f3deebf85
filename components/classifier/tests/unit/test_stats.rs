//! Unit tests for guards and aggregate helpers

use classifier::{guards, stats, Classifier, GuardError, TypeCategory};
use host_value::{Realm, Value};

#[cfg(test)]
mod guard_tests {
    use super::*;

    #[test]
    fn test_assert_type_reports_both_tags() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let map = Value::from(realm.new_map(vec![]));
        assert_eq!(
            guards::assert_type(&classifier, &map, "set"),
            Err(GuardError::TypeMismatch {
                expected: "set".into(),
                actual: "map".into(),
            })
        );
    }

    #[test]
    fn test_is_type_and_is_one_of() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let date = Value::from(realm.new_date(0.0));
        assert!(guards::is_type(&classifier, &date, "date"));
        assert!(guards::is_one_of(&classifier, &date, &["regexp", "date"]));
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn test_type_stats_order_and_counts() {
        let realm = Realm::new();
        let classifier = Classifier::new(&realm);
        let values = vec![
            Value::from(realm.new_set(vec![])),
            Value::from(true),
            Value::from(realm.new_set(vec![])),
        ];
        let counts: Vec<(String, usize)> = stats::type_stats(&classifier, &values)
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        assert_eq!(counts, vec![("set".to_string(), 2), ("boolean".to_string(), 1)]);
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        let classifier = Classifier::new(&Realm::new());
        let values = [Value::from("a"), Value::from(1)];
        assert_eq!(stats::most_common_type(&classifier, &values).unwrap(), "string");
        assert_eq!(stats::least_common_type(&classifier, &values).unwrap(), "string");
    }

    #[test]
    fn test_category_of_custom_tag() {
        assert_eq!(stats::type_category("widget"), TypeCategory::Special);
        assert_eq!(stats::type_category("promise"), TypeCategory::Modern);
    }
}
