//! Unit tests for classification-driven coercion

use classifier::{converters, Classifier};
use host_value::{FunctionKind, ObjectClass, Realm, Symbol, TypedArrayKind, Value};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn setup() -> (Realm, Classifier) {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    (realm, classifier)
}

#[cfg(test)]
mod primitive_target_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_string_per_kind() {
        let (realm, classifier) = setup();
        let cases: Vec<(Value, &str)> = vec![
            (Value::from("s"), "s"),
            (Value::from(1.5), "1.5"),
            (Value::from(BigInt::from(5)), "5"),
            (Value::from(Symbol::new(Some("x"))), "Symbol(x)"),
            (Value::Undefined, "undefined"),
            (Value::Null, "null"),
            (realm.new_regexp("a+", "g").into(), "/a+/g"),
            (
                realm.new_function(FunctionKind::Arrow, "f", "() => 1").into(),
                "() => 1",
            ),
            (realm.new_named_error("TypeError", "bad").into(), "TypeError: bad"),
            (realm.new_map(vec![]).into(), "[object Map]"),
        ];
        for (value, expected) in cases {
            assert_eq!(converters::to_string(&classifier, &value), expected);
        }
    }

    #[test]
    fn test_to_string_keeps_insertion_order() {
        let (realm, classifier) = setup();
        let obj = realm.new_object();
        obj.set("b", 1)
            .set("a", realm.new_array(vec![Value::from(true), Value::from("s")]));
        assert_eq!(
            converters::to_string(&classifier, &Value::from(obj)),
            r#"{"b":1,"a":[true,"s"]}"#
        );
    }

    #[test]
    fn test_to_number() {
        let (realm, classifier) = setup();
        let number = |value: Value| converters::to_number(&classifier, &value);
        assert_eq!(number(Value::from("0x10")), Some(16.0));
        assert_eq!(number(Value::from(" 3 ")), Some(3.0));
        assert_eq!(number(Value::from("three")), None);
        assert_eq!(number(Value::from(true)), Some(1.0));
        assert_eq!(number(Value::Null), Some(0.0));
        assert_eq!(number(Value::Undefined), None);
        assert_eq!(number(Value::from(BigInt::from(1u64 << 60))), None);
        assert_eq!(number(Value::from(BigInt::from(-7))), Some(-7.0));
        assert_eq!(number(realm.new_date(5.0).into()), Some(5.0));
        assert_eq!(number(realm.new_object().into()), None);
    }

    #[test]
    fn test_to_boolean() {
        let (realm, classifier) = setup();
        let truth = |value: Value| converters::to_boolean(&classifier, &value);
        assert!(!truth(Value::from("No")));
        assert!(!truth(Value::from("UNDEFINED")));
        assert!(truth(Value::from("yes")));
        assert!(!truth(Value::from(f64::NAN)));
        assert!(!truth(realm.new_array(vec![]).into()));
        assert!(truth(realm.new_array(vec![Value::Null]).into()));
        assert!(!truth(realm.new_object().into()));
        let filled = realm.new_object();
        filled.set("a", 1);
        assert!(truth(filled.into()));
        assert!(truth(realm.new_map(vec![]).into()));
    }

    #[test]
    fn test_to_bigint() {
        let (_, classifier) = setup();
        let big = |value: Value| converters::to_bigint(&classifier, &value);
        assert_eq!(big(Value::from(3.0)), Some(BigInt::from(3)));
        assert_eq!(big(Value::from(3.5)), None);
        assert_eq!(big(Value::from(f64::INFINITY)), None);
        assert_eq!(big(Value::from("12")), Some(BigInt::from(12)));
        assert_eq!(big(Value::from("0b11")), Some(BigInt::from(3)));
        assert_eq!(big(Value::from(true)), Some(BigInt::from(1)));
        assert_eq!(big(Value::Null), None);
    }

    #[test]
    fn test_to_symbol() {
        let (_, classifier) = setup();
        let existing = Symbol::new(Some("s"));
        assert_eq!(
            converters::to_symbol(&classifier, &Value::from(existing.clone())),
            existing
        );
        let made = converters::to_symbol(&classifier, &Value::from(42));
        assert_eq!(made.description(), Some("42"));
        let from_null = converters::to_symbol(&classifier, &Value::Null);
        assert_eq!(from_null.description(), Some("null"));
    }
}

#[cfg(test)]
mod complex_target_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_array() {
        let (realm, classifier) = setup();
        let array = |value: Value| converters::to_array(&classifier, &value).unwrap();

        let existing = realm.new_array(vec![Value::from(1)]);
        assert!(array(Value::from(&existing)).ptr_eq(&existing));
        assert_eq!(
            array(Value::from("ab")).elements().unwrap(),
            vec![Value::from("a"), Value::from("b")]
        );
        assert!(array(Value::Null).elements().unwrap().is_empty());
        assert_eq!(array(Value::from(5)).elements().unwrap(), vec![Value::from(5)]);

        let map = realm.new_map(vec![(Value::from("k"), Value::from(1))]);
        let pairs = array(map.into()).elements().unwrap();
        let pair = pairs[0].as_object().unwrap().elements().unwrap();
        assert_eq!(pair, vec![Value::from("k"), Value::from(1)]);

        let like = realm.new_object();
        like.set("length", 2).set("0", "x");
        assert_eq!(
            array(like.into()).elements().unwrap(),
            vec![Value::from("x"), Value::Undefined]
        );
        let typed = realm.new_typed_array(TypedArrayKind::Uint8, 2);
        assert_eq!(
            array(typed.into()).elements().unwrap(),
            vec![Value::from(0), Value::from(0)]
        );
    }

    #[test]
    fn test_to_array_rejects_absurd_length() {
        let (realm, classifier) = setup();
        let like = realm.new_object();
        like.set("length", 1e12);
        assert!(converters::to_array(&classifier, &like.into()).is_err());
    }

    #[test]
    fn test_to_object() {
        let (realm, classifier) = setup();
        let from_array = converters::to_object(
            &classifier,
            &realm.new_array(vec![Value::from("a"), Value::from("b")]).into(),
        );
        assert_eq!(from_array.get("1").unwrap(), Value::from("b"));

        let map = realm.new_map(vec![(Value::from(1), Value::from("one"))]);
        let from_map = converters::to_object(&classifier, &map.into());
        assert_eq!(from_map.get("1").unwrap(), Value::from("one"));

        let wrapped = converters::to_object(&classifier, &Value::from(5));
        assert_eq!(wrapped.get("value").unwrap(), Value::from(5));
        assert!(converters::to_object(&classifier, &Value::Null).own_keys().is_empty());

        let plain = realm.new_object();
        assert!(converters::to_object(&classifier, &Value::from(&plain)).ptr_eq(&plain));
    }

    #[test]
    fn test_to_map_and_to_set() {
        let (realm, classifier) = setup();
        let obj = realm.new_object();
        obj.set("a", 1);
        let map = converters::to_map(&classifier, &obj.into()).unwrap().unwrap();
        assert_eq!(map.map_entries().unwrap(), vec![(Value::from("a"), Value::from(1))]);
        assert!(converters::to_map(&classifier, &Value::from(1)).unwrap().is_none());

        let values = realm.new_array(vec![Value::from(1), Value::from(1), Value::from(2)]);
        let set = converters::to_set(&classifier, &values.into()).unwrap();
        assert_eq!(set.set_values().unwrap(), vec![Value::from(1), Value::from(2)]);
        let empty = converters::to_set(&classifier, &Value::Undefined).unwrap();
        assert_eq!(empty.collection_size(), Some(0));
        let single = converters::to_set(&classifier, &Value::from("ab")).unwrap();
        assert_eq!(single.collection_size(), Some(2));
    }

    #[test]
    fn test_to_date() {
        let (realm, classifier) = setup();
        let time = |value: Value| {
            converters::to_date(&classifier, &value).and_then(|date| date.time_value())
        };
        assert_eq!(time(Value::from("2020-01-02")), Some(1_577_923_200_000.0));
        assert_eq!(
            time(Value::from("2020-01-02T00:00:01.500Z")),
            Some(1_577_923_201_500.0)
        );
        assert_eq!(time(Value::from("not a date")), None);
        assert_eq!(time(Value::from(f64::NAN)), None);
        assert_eq!(time(Value::from(0)), Some(0.0));
        let date = realm.new_date(1.0);
        assert!(converters::to_date(&classifier, &Value::from(&date))
            .unwrap()
            .ptr_eq(&date));
    }

    #[test]
    fn test_to_regexp_and_to_function() {
        let (realm, classifier) = setup();
        let regexp = converters::to_regexp(&classifier, &Value::from("a+")).unwrap();
        assert!(matches!(regexp.class(), ObjectClass::RegExp { source, .. } if source == "a+"));
        assert!(converters::to_regexp(&classifier, &Value::from("(")).is_none());

        let f = realm.new_function(FunctionKind::Async, "f", "async () => {}");
        assert!(converters::to_function(&classifier, &Value::from(&f)).is_some());
        assert!(converters::to_function(&classifier, &Value::from("() => 1")).is_none());
    }

    #[test]
    fn test_to_error() {
        let (realm, classifier) = setup();
        let message = |value: Value| {
            let error = converters::to_error(&classifier, &value).unwrap();
            error.get("message").unwrap()
        };
        assert_eq!(message(Value::from("boom")), Value::from("boom"));
        let described = realm.new_object();
        described.set("message", 7);
        assert_eq!(message(described.into()), Value::from("7"));
        assert_eq!(message(Value::from(5)), Value::from("5"));
        let error = realm.new_error("e");
        assert!(converters::to_error(&classifier, &Value::from(&error))
            .unwrap()
            .ptr_eq(&error));
    }

    #[test]
    fn test_to_promise() {
        let (realm, classifier) = setup();
        let promise = realm.new_promise();
        assert!(converters::to_promise(&classifier, &Value::from(&promise)).ptr_eq(&promise));
        let wrapped = converters::to_promise(&classifier, &Value::from(1));
        assert_eq!(classifier.classify(&wrapped.into()), "promise");
    }

    #[test]
    fn test_to_buffer_needs_host_buffer() {
        let (_, bare) = setup();
        assert!(converters::to_buffer(&bare, &Value::from("x")).is_none());

        let node = Realm::node();
        let classifier = Classifier::new(&node);
        let buffer = converters::to_buffer(&classifier, &Value::from("héllo")).unwrap();
        assert_eq!(buffer.typed_length(), Some(6));
        assert_eq!(classifier.classify(&Value::from(&buffer)), "buffer");
        let from_bytes = node.new_array_buffer(3);
        assert_eq!(
            converters::to_buffer(&classifier, &from_bytes.into())
                .unwrap()
                .typed_length(),
            Some(3)
        );
        assert!(converters::to_buffer(&classifier, &Value::from(1)).is_none());
    }

    #[test]
    fn test_to_typed_array() {
        let (realm, classifier) = setup();
        let buffer = realm.new_array_buffer(8);
        let ints = converters::to_typed_array(&classifier, &Value::from(&buffer), TypedArrayKind::Int32)
            .unwrap();
        assert_eq!(ints.typed_length(), Some(2));
        assert!(matches!(
            ints.class(),
            ObjectClass::TypedArray { buffer: viewed, .. } if viewed.ptr_eq(&buffer)
        ));
        assert_eq!(classifier.classify(&Value::from(&ints)), "int32array");

        let odd = realm.new_array_buffer(6);
        assert!(converters::to_typed_array(&classifier, &odd.into(), TypedArrayKind::Int32).is_none());

        let list = realm.new_array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let floats = converters::to_typed_array(&classifier, &list.into(), TypedArrayKind::Float64)
            .unwrap();
        assert_eq!(floats.typed_length(), Some(3));

        let bytes = realm.new_typed_array(TypedArrayKind::Int8, 4);
        let words = converters::to_typed_array(&classifier, &bytes.into(), TypedArrayKind::Uint16)
            .unwrap();
        assert_eq!(words.byte_length(), Some(8));

        let view = realm.new_data_view(&realm.new_array_buffer(4)).unwrap();
        assert!(converters::to_typed_array(&classifier, &view.into(), TypedArrayKind::Int8).is_none());
    }
}

#[cfg(test)]
mod coerce_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_kind_is_identity() {
        let (realm, classifier) = setup();
        let map = Value::from(realm.new_map(vec![]));
        assert_eq!(converters::coerce_type(&classifier, &map, "map"), Some(map));
    }

    #[test]
    fn test_structural_targets() {
        let (realm, classifier) = setup();
        let coerce = |value: Value, target: &str| converters::coerce_type(&classifier, &value, target);

        let date = coerce(Value::from("2021-05-06"), "date").unwrap();
        assert_eq!(classifier.classify(&date), "date");
        assert_eq!(coerce(Value::from(5), "date"), None);

        let obj = coerce(realm.new_array(vec![Value::from("z")]).into(), "object").unwrap();
        assert_eq!(obj.as_object().unwrap().get("0").unwrap(), Value::from("z"));

        let like = realm.new_object();
        like.set("length", 1).set("0", "a");
        let array = coerce(like.into(), "array").unwrap();
        assert_eq!(array.as_object().unwrap().elements().unwrap(), vec![Value::from("a")]);
        assert_eq!(coerce(realm.new_object().into(), "array"), None);
        assert_eq!(coerce(Value::from("x"), "array"), None);
    }

    #[test]
    fn test_primitive_targets() {
        let (_, classifier) = setup();
        let coerce = |value: Value, target: &str| converters::coerce_type(&classifier, &value, target);
        assert_eq!(coerce(Value::from(1), "string"), Some(Value::from("1")));
        assert_eq!(coerce(Value::from("1"), "boolean"), Some(Value::from(true)));
        assert_eq!(coerce(Value::from("1.5"), "bigint"), None);
        assert_eq!(coerce(Value::from(2), "bigint"), Some(Value::from(BigInt::from(2))));
        assert_eq!(coerce(Value::from("x"), "undefined"), Some(Value::Undefined));
        assert_eq!(coerce(Value::from("x"), "null"), Some(Value::Null));
        assert_eq!(coerce(Value::from("x"), "email"), None);
    }
}
