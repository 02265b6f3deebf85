//! Aggregate helpers over collections of values.
//!
//! Groupings preserve first-seen order, so ties in
//! [`most_common_type`] and [`least_common_type`] go to the tag seen first.

use host_value::Value;
use indexmap::IndexMap;

use crate::classifier::Classifier;
use crate::tag::{BuiltinType, TypeCategory, TypeTag};

/// Category of a tag name; anything outside the vocabulary is `special`
pub fn type_category(tag: &str) -> TypeCategory {
    BuiltinType::from_name(tag).map_or(TypeCategory::Special, BuiltinType::category)
}

/// Whether `tag` is in the closed vocabulary
pub fn is_valid_type(tag: &str) -> bool {
    BuiltinType::from_name(tag).is_some()
}

/// Whether two values classify the same
pub fn compare_types(classifier: &Classifier, a: &Value, b: &Value) -> bool {
    classifier.classify(a) == classifier.classify(b)
}

/// Values bucketed by tag
pub fn group_by_type(classifier: &Classifier, values: &[Value]) -> IndexMap<TypeTag, Vec<Value>> {
    let mut groups: IndexMap<TypeTag, Vec<Value>> = IndexMap::new();
    for value in values {
        groups
            .entry(classifier.classify(value))
            .or_default()
            .push(value.clone());
    }
    groups
}

/// Number of values per tag
///
/// # Examples
///
/// ```
/// use classifier::{stats, Classifier};
/// use host_value::{Realm, Value};
///
/// let classifier = Classifier::new(&Realm::new());
/// let values = [Value::from(1), Value::from("a"), Value::from(2)];
/// let counts = stats::type_stats(&classifier, &values);
/// assert_eq!(counts.get("number"), Some(&2));
/// assert_eq!(stats::most_common_type(&classifier, &values).unwrap(), "number");
/// ```
pub fn type_stats(classifier: &Classifier, values: &[Value]) -> IndexMap<TypeTag, usize> {
    let mut counts: IndexMap<TypeTag, usize> = IndexMap::new();
    for value in values {
        *counts.entry(classifier.classify(value)).or_default() += 1;
    }
    counts
}

/// Distinct tags in first-seen order
pub fn unique_types(classifier: &Classifier, values: &[Value]) -> Vec<TypeTag> {
    type_stats(classifier, values).into_keys().collect()
}

/// Tag with the highest count, `None` for an empty slice
pub fn most_common_type(classifier: &Classifier, values: &[Value]) -> Option<TypeTag> {
    let mut best: Option<(TypeTag, usize)> = None;
    for (tag, count) in type_stats(classifier, values) {
        if best.as_ref().map_or(true, |(_, max)| count > *max) {
            best = Some((tag, count));
        }
    }
    best.map(|(tag, _)| tag)
}

/// Tag with the lowest count, `None` for an empty slice
pub fn least_common_type(classifier: &Classifier, values: &[Value]) -> Option<TypeTag> {
    let mut best: Option<(TypeTag, usize)> = None;
    for (tag, count) in type_stats(classifier, values) {
        if best.as_ref().map_or(true, |(_, min)| count < *min) {
            best = Some((tag, count));
        }
    }
    best.map(|(tag, _)| tag)
}

/// Whether every value has the same tag; true for an empty slice
pub fn is_homogeneous(classifier: &Classifier, values: &[Value]) -> bool {
    let mut tags = values.iter().map(|value| classifier.classify(value));
    match tags.next() {
        Some(first) => tags.all(|tag| tag == first),
        None => true,
    }
}

/// Number of values with tag `tag`
pub fn count_by_type(classifier: &Classifier, values: &[Value], tag: &str) -> usize {
    values
        .iter()
        .filter(|value| classifier.classify(value) == tag)
        .count()
}

/// Values with tag `tag`, in order
pub fn filter_by_type(classifier: &Classifier, values: &[Value], tag: &str) -> Vec<Value> {
    values
        .iter()
        .filter(|value| classifier.classify(value) == tag)
        .cloned()
        .collect()
}

/// Whether every value has tag `expected`; true for an empty slice
pub fn is_type_of_all(classifier: &Classifier, values: &[Value], expected: &str) -> bool {
    every_of_type(classifier, values, expected)
}

/// First value with tag `tag`
pub fn find_by_type(classifier: &Classifier, values: &[Value], tag: &str) -> Option<Value> {
    values
        .iter()
        .find(|value| classifier.classify(value) == tag)
        .cloned()
}

/// Whether at least one value has tag `tag`
pub fn some_of_type(classifier: &Classifier, values: &[Value], tag: &str) -> bool {
    values.iter().any(|value| classifier.classify(value) == tag)
}

/// Whether every value has tag `tag`; true for an empty slice
pub fn every_of_type(classifier: &Classifier, values: &[Value], tag: &str) -> bool {
    values.iter().all(|value| classifier.classify(value) == tag)
}

/// Whether no value has tag `tag`
pub fn none_of_type(classifier: &Classifier, values: &[Value], tag: &str) -> bool {
    !some_of_type(classifier, values, tag)
}

/// Whether at least two values differ in tag; false for an empty slice
pub fn is_heterogeneous(classifier: &Classifier, values: &[Value]) -> bool {
    !is_homogeneous(classifier, values)
}

/// Split values into those matching `predicate` and the rest, keeping order
///
/// # Examples
///
/// ```
/// use classifier::{stats, Classifier};
/// use host_value::{Realm, Value};
///
/// let classifier = Classifier::new(&Realm::new());
/// let values = [Value::from(1), Value::from("a"), Value::Null, Value::from(2)];
///
/// let (numbers, rest) = stats::partition_by_type(&classifier, &values, "number");
/// assert_eq!(numbers, vec![Value::from(1), Value::from(2)]);
/// assert_eq!(rest.len(), 2);
///
/// let (truthy, falsy) = stats::partition(&values, Value::is_truthy);
/// assert_eq!((truthy.len(), falsy.len()), (3, 1));
/// ```
pub fn partition<P>(values: &[Value], predicate: P) -> (Vec<Value>, Vec<Value>)
where
    P: Fn(&Value) -> bool,
{
    values.iter().cloned().partition(|value| predicate(value))
}

/// Split values into those with tag `tag` and the rest, keeping order
pub fn partition_by_type(
    classifier: &Classifier,
    values: &[Value],
    tag: &str,
) -> (Vec<Value>, Vec<Value>) {
    partition(values, |value| classifier.classify(value) == tag)
}
