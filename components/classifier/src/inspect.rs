//! Human-readable rendering of host values.
//!
//! [`inspect`] prints a value the way a debugging console would: strings
//! quoted, containers expanded up to [`InspectOptions::depth`], cycles shown
//! as `[Circular]`. Rendering never fails; a getter that throws while an
//! object is printed shows up as `[Error: message]` in place of its value.
//! [`inspect_type`] prints the [`DetailedTypeInfo`] of a value instead of
//! its contents.

use host_value::{HostError, Object, PropertyKey, Value};
use tracing::trace;

use crate::classifier::Classifier;
use crate::config::InspectOptions;
use crate::converters;
use crate::detailed::DetailedTypeInfo;
use crate::reflect;
use crate::tag::BuiltinType;

/// Render `value` for display.
///
/// # Examples
///
/// ```
/// use classifier::inspect::inspect;
/// use classifier::{Classifier, InspectOptions};
/// use host_value::{Realm, Value};
///
/// let realm = Realm::new();
/// let classifier = Classifier::new(&realm);
/// let options = InspectOptions::default();
///
/// let point = realm.new_object();
/// point.set("x", 1).set("y", "two");
/// assert_eq!(inspect(&classifier, &point.into(), &options), "{ x: 1, y: 'two' }");
///
/// let list = realm.new_array(vec![Value::from(1), Value::Null]);
/// assert_eq!(inspect(&classifier, &list.into(), &options), "[ 1, null ]");
/// ```
pub fn inspect(classifier: &Classifier, value: &Value, options: &InspectOptions) -> String {
    Inspector {
        classifier,
        options,
        seen: Vec::new(),
    }
    .value(value, 0)
}

/// Render the detailed classification of `value`, one field per line.
///
/// ```text
/// Type: array
/// Constructor: Array
/// Flags: built-in, iterable
/// Metadata: {length: 3}
/// ```
pub fn inspect_type(classifier: &Classifier, value: &Value) -> String {
    let info = classifier.detailed_classify(value);
    let mut lines = vec![format!("Type: {}", info.type_tag)];
    if let Some(name) = &info.constructor_name {
        lines.push(format!("Constructor: {}", name));
    }
    if let Some(tag) = &info.custom_tag {
        lines.push(format!("Custom Type: {}", tag));
    }
    let flags = flags_of(&info);
    if !flags.is_empty() {
        lines.push(format!("Flags: {}", flags.join(", ")));
    }
    if let Some(metadata) = &info.metadata {
        let fields: Vec<String> = [
            ("length", metadata.length),
            ("size", metadata.size),
            ("byteLength", metadata.byte_length),
        ]
        .into_iter()
        .filter_map(|(name, field)| field.map(|n| format!("{}: {}", name, n)))
        .collect();
        if !fields.is_empty() {
            lines.push(format!("Metadata: {{{}}}", fields.join(", ")));
        }
    }
    lines.join("\n")
}

fn flags_of(info: &DetailedTypeInfo) -> Vec<&'static str> {
    [
        (info.is_primitive, "primitive"),
        (info.is_built_in, "built-in"),
        (info.is_nullish, "nullish"),
        (info.is_iterable, "iterable"),
        (info.is_async, "async"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

struct Inspector<'a> {
    classifier: &'a Classifier,
    options: &'a InspectOptions,
    /// Identities of the objects on the current rendering path
    seen: Vec<usize>,
}

impl Inspector<'_> {
    fn value(&mut self, value: &Value, depth: usize) -> String {
        let Value::Object(object) = value else {
            return match value {
                Value::String(s) => self.string(s),
                other => other.to_string(),
            };
        };
        let builtin = self.classifier.classify(value).builtin();
        if depth > self.options.depth {
            return match builtin {
                Some(BuiltinType::Array) => "[Array]".to_string(),
                _ => "[Object]".to_string(),
            };
        }
        if self.seen.contains(&object.identity()) {
            return "[Circular]".to_string();
        }
        self.seen.push(object.identity());
        let rendered = self.object(object, value, builtin, depth);
        self.seen.pop();
        rendered
    }

    fn string(&self, s: &str) -> String {
        let limit = self.options.max_string_length;
        if s.chars().count() > limit {
            let head: String = s.chars().take(limit).collect();
            format!("'{}...'", head)
        } else {
            format!("'{}'", s)
        }
    }

    fn object(&mut self, object: &Object, value: &Value, builtin: Option<BuiltinType>, depth: usize) -> String {
        match builtin {
            Some(BuiltinType::Array) => self.array(object, depth),
            Some(BuiltinType::Object) => self.plain(object, depth),
            Some(BuiltinType::Function) => function_label("Function", object),
            Some(BuiltinType::AsyncFunction) => function_label("AsyncFunction", object),
            Some(BuiltinType::GeneratorFunction) => function_label("GeneratorFunction", object),
            Some(BuiltinType::AsyncGeneratorFunction) => function_label("AsyncGeneratorFunction", object),
            Some(BuiltinType::Date | BuiltinType::RegExp) => converters::to_string(self.classifier, value),
            Some(BuiltinType::Error) => error_label(object),
            Some(BuiltinType::Map) => self.map(object, depth),
            Some(BuiltinType::Set) => self.set(object, depth),
            Some(BuiltinType::Promise) => "Promise { <pending> }".to_string(),
            _ => match reflect::constructor_name(value) {
                Some(name) => format!("{} {{}}", name),
                None => format!("[{}]", self.classifier.classify(value)),
            },
        }
    }

    fn array(&mut self, object: &Object, depth: usize) -> String {
        let elements = object.elements().unwrap_or_default();
        let limit = self.options.max_array_length;
        let mut items: Vec<String> = elements
            .iter()
            .take(limit)
            .map(|element| self.value(element, depth + 1))
            .collect();
        if elements.len() > limit {
            items.push(format!("... {} more items", elements.len() - limit));
        }
        self.layout("[", "]", items)
    }

    fn plain(&mut self, object: &Object, depth: usize) -> String {
        let mut keys: Vec<PropertyKey> = object
            .own_keys()
            .into_iter()
            .filter(|key| self.options.show_hidden || matches!(key, PropertyKey::String(_)))
            .collect();
        if self.options.sorted {
            keys.sort_by_cached_key(|key| key.to_string());
        }
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            let rendered = match object.get(key.clone()) {
                Ok(value) => self.value(&value, depth + 1),
                Err(error) => {
                    trace!(%key, %error, "getter threw during inspect");
                    format!("[Error: {}]", error_message(&error))
                }
            };
            items.push(format!("{}: {}", key, rendered));
        }
        self.layout("{", "}", items)
    }

    fn map(&mut self, object: &Object, depth: usize) -> String {
        let entries = object.map_entries().unwrap_or_default();
        let items: Vec<String> = entries
            .iter()
            .take(self.options.max_array_length)
            .map(|(key, value)| format!("{} => {}", self.value(key, depth + 1), self.value(value, depth + 1)))
            .collect();
        format!("Map({}) {{{}}}", entries.len(), items.join(", "))
    }

    fn set(&mut self, object: &Object, depth: usize) -> String {
        let values = object.set_values().unwrap_or_default();
        let items: Vec<String> = values
            .iter()
            .take(self.options.max_array_length)
            .map(|value| self.value(value, depth + 1))
            .collect();
        format!("Set({}) {{{}}}", values.len(), items.join(", "))
    }

    /// Join `items` inside `open`/`close`, breaking onto indented lines when
    /// the single-line form would exceed `break_length`
    fn layout(&self, open: &str, close: &str, items: Vec<String>) -> String {
        if items.is_empty() {
            return format!("{}{}", open, close);
        }
        let inline = items.join(", ");
        if self.options.compact || inline.len() <= self.options.break_length {
            return format!("{} {} {}", open, inline, close);
        }
        let body: Vec<String> = items
            .iter()
            .map(|item| format!("  {}", item.replace('\n', "\n  ")))
            .collect();
        format!("{}\n{}\n{}", open, body.join(",\n"), close)
    }
}

fn function_label(kind: &str, function: &Object) -> String {
    let name = reflect::function_name(function).unwrap_or_else(|| "anonymous".to_string());
    format!("[{}: {}]", kind, name)
}

fn error_label(error: &Object) -> String {
    let field = |key: &str| reflect::get(error, key).map(|v| v.to_string()).unwrap_or_default();
    format!("{}: {}", field("name"), field("message"))
}

fn error_message(error: &HostError) -> &str {
    match error {
        HostError::TypeError(message) | HostError::Thrown(message) => message,
    }
}
