//! Unit tests for value inspection

use classifier::inspect::{inspect, inspect_type};
use classifier::{Classifier, InspectOptions};
use host_value::{FunctionKind, Realm, Symbol, Value};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn setup() -> (Realm, Classifier) {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    (realm, classifier)
}

fn numbers(count: usize) -> Vec<Value> {
    (0..count).map(|n| Value::from(n as f64)).collect()
}

#[cfg(test)]
mod primitive_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primitives() {
        let (_realm, classifier) = setup();
        let options = InspectOptions::default();
        let cases: Vec<(Value, &str)> = vec![
            (Value::Undefined, "undefined"),
            (Value::Null, "null"),
            (Value::from(true), "true"),
            (Value::from(-0.5), "-0.5"),
            (Value::from(f64::NAN), "NaN"),
            (Value::from(BigInt::from(7)), "7n"),
            (Value::from(Symbol::new(Some("id"))), "Symbol(id)"),
            (Value::from("hi"), "'hi'"),
        ];
        for (value, expected) in cases {
            assert_eq!(inspect(&classifier, &value, &options), expected);
        }
    }

    #[test]
    fn test_long_string_is_cut() {
        let (_realm, classifier) = setup();
        let options = InspectOptions {
            max_string_length: 3,
            ..InspectOptions::default()
        };
        assert_eq!(inspect(&classifier, &Value::from("abcdef"), &options), "'abc...'");
        assert_eq!(inspect(&classifier, &Value::from("abc"), &options), "'abc'");
    }
}

#[cfg(test)]
mod container_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_containers() {
        let (realm, classifier) = setup();
        let options = InspectOptions::default();
        assert_eq!(inspect(&classifier, &realm.new_array(vec![]).into(), &options), "[]");
        assert_eq!(inspect(&classifier, &realm.new_object().into(), &options), "{}");
    }

    #[test]
    fn test_array_truncation() {
        let (realm, classifier) = setup();
        let options = InspectOptions {
            max_array_length: 3,
            ..InspectOptions::default()
        };
        let list = realm.new_array(numbers(5));
        assert_eq!(
            inspect(&classifier, &list.into(), &options),
            "[ 0, 1, 2, ... 2 more items ]"
        );
    }

    #[test]
    fn test_long_array_breaks_lines() {
        let (realm, classifier) = setup();
        let list = realm.new_array(numbers(30));
        let rendered = inspect(&classifier, &list.clone().into(), &InspectOptions::default());
        assert!(rendered.starts_with("[\n  0,\n  1,\n"));
        assert!(rendered.ends_with("  29\n]"));

        let compact = InspectOptions {
            compact: true,
            ..InspectOptions::default()
        };
        let rendered = inspect(&classifier, &list.into(), &compact);
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_nested_break_indents_every_line() {
        let (realm, classifier) = setup();
        let inner = realm.new_array(numbers(30));
        let outer = realm.new_object();
        outer.set("list", &inner);
        let rendered = inspect(&classifier, &outer.into(), &InspectOptions::default());
        assert!(rendered.starts_with("{\n  list: [\n    0,\n"));
        assert!(rendered.ends_with("    29\n  ]\n}"));
    }

    #[test]
    fn test_sorted_and_hidden_keys() {
        let (realm, classifier) = setup();
        let object = realm.new_object();
        object.set("b", 2).set("a", 1);
        object.set(Symbol::new(Some("tag")), "x");

        let value = Value::from(object);
        assert_eq!(inspect(&classifier, &value, &InspectOptions::default()), "{ b: 2, a: 1 }");
        let options = InspectOptions {
            sorted: true,
            show_hidden: true,
            ..InspectOptions::default()
        };
        assert_eq!(
            inspect(&classifier, &value, &options),
            "{ [Symbol(tag)]: 'x', a: 1, b: 2 }"
        );
    }

    #[test]
    fn test_mutual_cycle() {
        let (realm, classifier) = setup();
        let a = realm.new_object();
        let b = realm.new_array(vec![Value::from(&a)]);
        a.set("peer", &b);
        assert_eq!(
            inspect(&classifier, &a.into(), &InspectOptions::default()),
            "{ peer: [ [Circular] ] }"
        );
    }

    #[test]
    fn test_zero_depth() {
        let (realm, classifier) = setup();
        let options = InspectOptions {
            depth: 0,
            ..InspectOptions::default()
        };
        let object = realm.new_object();
        object.set("n", 1);
        object.set("list", &realm.new_array(vec![]));
        object.set("child", &realm.new_object());
        assert_eq!(
            inspect(&classifier, &object.into(), &options),
            "{ n: 1, list: [Array], child: [Object] }"
        );
    }

    #[test]
    fn test_map_and_set() {
        let (realm, classifier) = setup();
        let options = InspectOptions::default();
        let map = realm.new_map(vec![(Value::from("k"), Value::from(1))]);
        assert_eq!(inspect(&classifier, &map.into(), &options), "Map(1) {'k' => 1}");
        let set = realm.new_set(vec![Value::from(1), Value::from(2)]);
        assert_eq!(inspect(&classifier, &set.into(), &options), "Set(2) {1, 2}");
    }
}

#[cfg(test)]
mod builtin_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_function_labels() {
        let (realm, classifier) = setup();
        let options = InspectOptions::default();
        let cases = [
            (FunctionKind::Normal, "f", "[Function: f]"),
            (FunctionKind::Async, "g", "[AsyncFunction: g]"),
            (FunctionKind::Generator, "h", "[GeneratorFunction: h]"),
            (FunctionKind::AsyncGenerator, "i", "[AsyncGeneratorFunction: i]"),
            (FunctionKind::Arrow, "", "[Function: anonymous]"),
        ];
        for (kind, name, expected) in cases {
            let f = realm.new_function(kind, name, "function () {}");
            assert_eq!(inspect(&classifier, &f.into(), &options), expected);
        }
    }

    #[test]
    fn test_builtin_objects() {
        let (realm, classifier) = setup();
        let options = InspectOptions::default();
        let cases: Vec<(Value, &str)> = vec![
            (realm.new_date(0.0).into(), "1970-01-01T00:00:00.000Z"),
            (realm.new_date(f64::NAN).into(), "Invalid Date"),
            (realm.new_regexp("a|b", "gi").into(), "/a|b/gi"),
            (realm.new_named_error("RangeError", "too big").into(), "RangeError: too big"),
            (realm.new_promise().into(), "Promise { <pending> }"),
        ];
        for (value, expected) in cases {
            assert_eq!(inspect(&classifier, &value, &options), expected);
        }
    }

    #[test]
    fn test_class_instance_shows_constructor() {
        let (realm, classifier) = setup();
        let widget = realm.new_class("Widget").instantiate();
        widget.set("size", 3);
        assert_eq!(
            inspect(&classifier, &widget.into(), &InspectOptions::default()),
            "Widget {}"
        );
        let weak = realm.new_weak_map();
        assert_eq!(
            inspect(&classifier, &weak.into(), &InspectOptions::default()),
            "WeakMap {}"
        );
    }
}

#[cfg(test)]
mod inspect_type_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_report() {
        let (realm, classifier) = setup();
        let map = realm.new_map(vec![(Value::from(1), Value::from(2))]);
        assert_eq!(
            inspect_type(&classifier, &map.into()),
            "Type: map\nConstructor: Map\nCustom Type: Map\nFlags: built-in, iterable\nMetadata: {size: 1}"
        );
    }

    #[test]
    fn test_async_function_report() {
        let (realm, classifier) = setup();
        let f = realm.new_function(FunctionKind::Async, "f", "async function f() {}");
        let report = inspect_type(&classifier, &f.into());
        assert!(report.starts_with("Type: asyncfunction\nConstructor: AsyncFunction"));
        assert!(report.contains("\nFlags: built-in, async"));
        assert!(!report.contains("Metadata"));
    }
}
