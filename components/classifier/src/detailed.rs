//! Detailed type reports.

use host_value::{Object, Symbol, Value};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::reflect;
use crate::tag::{BuiltinType, TypeCategory, TypeTag};

/// Structural report on a value, built on top of [`Classifier::classify`].
///
/// Serializes with camelCase field names; `metadata` is omitted when the
/// value's kind carries none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTypeInfo {
    /// The classified tag
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// `value.constructor.name`
    pub constructor_name: Option<String>,
    /// Constructor name of the value's prototype
    pub prototype_constructor_name: Option<String>,
    /// `null` or any non-object value
    pub is_primitive: bool,
    /// Whether the tag is in the closed vocabulary
    pub is_built_in: bool,
    /// `null` or `undefined`
    pub is_nullish: bool,
    /// Has a callable `Symbol.iterator`
    pub is_iterable: bool,
    /// Has a callable `Symbol.asyncIterator`, or is a promise or async function
    pub is_async: bool,
    /// The value of a truthy `Symbol.toStringTag`, rendered as a string
    pub custom_tag: Option<String>,
    /// Size information for arrays, collections, buffers and views
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TypeMetadata>,
}

/// Per-kind size information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetadata {
    /// Element count of arrays and typed arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Entry count of maps and sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Byte length of buffers and views
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_length: Option<usize>,
}

impl TypeMetadata {
    fn is_empty(&self) -> bool {
        self.length.is_none() && self.size.is_none() && self.byte_length.is_none()
    }
}

impl Classifier {
    /// Classify and describe a value. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use classifier::Classifier;
    /// use host_value::{Realm, Value};
    ///
    /// let realm = Realm::new();
    /// let classifier = Classifier::new(&realm);
    ///
    /// let array = realm.new_array(vec![Value::from(1), Value::from(2), Value::from(3)]);
    /// let info = classifier.detailed_classify(&Value::from(array));
    /// assert_eq!(info.type_tag, "array");
    /// assert_eq!(info.metadata.unwrap().length, Some(3));
    /// assert!(info.is_iterable);
    /// ```
    pub fn detailed_classify(&self, value: &Value) -> DetailedTypeInfo {
        let type_tag = self.classify(value);
        let is_built_in = type_tag.is_builtin();
        let is_nullish = value.is_nullish();

        let Value::Object(object) = value else {
            return DetailedTypeInfo {
                type_tag,
                constructor_name: None,
                prototype_constructor_name: None,
                is_primitive: true,
                is_built_in,
                is_nullish,
                is_iterable: false,
                is_async: false,
                custom_tag: None,
                metadata: None,
            };
        };

        let is_async = reflect::has_callable(object, Symbol::async_iterator())
            || matches!(
                type_tag.builtin(),
                Some(
                    BuiltinType::Promise
                        | BuiltinType::AsyncFunction
                        | BuiltinType::AsyncGeneratorFunction
                )
            );
        let metadata = collect_metadata(&type_tag, object);

        DetailedTypeInfo {
            constructor_name: reflect::constructor_name(value),
            prototype_constructor_name: reflect::prototype_constructor_name(value),
            is_primitive: false,
            is_built_in,
            is_nullish,
            is_iterable: reflect::has_callable(object, Symbol::iterator()),
            is_async,
            custom_tag: custom_tag(object),
            metadata: (!metadata.is_empty()).then_some(metadata),
            type_tag,
        }
    }
}

fn custom_tag(object: &Object) -> Option<String> {
    reflect::get(object, Symbol::to_string_tag())
        .filter(Value::is_truthy)
        .map(|tag| tag.to_string())
}

fn collect_metadata(tag: &TypeTag, object: &Object) -> TypeMetadata {
    let mut metadata = TypeMetadata::default();
    match tag.builtin() {
        Some(BuiltinType::Array) => {
            metadata.length = read_count(object, "length").or_else(|| object.array_length());
        }
        Some(BuiltinType::Map | BuiltinType::Set) => {
            metadata.size = read_count(object, "size").or_else(|| object.collection_size());
        }
        Some(BuiltinType::ArrayBuffer | BuiltinType::SharedArrayBuffer) => {
            metadata.byte_length = read_count(object, "byteLength").or_else(|| object.byte_length());
        }
        Some(builtin)
            if builtin.category() == TypeCategory::TypedArray || builtin == BuiltinType::Buffer =>
        {
            read_view(object, &mut metadata);
        }
        None if is_element_view(object) => read_view(object, &mut metadata),
        _ => {}
    }
    metadata
}

fn read_view(object: &Object, metadata: &mut TypeMetadata) {
    metadata.byte_length = read_count(object, "byteLength").or_else(|| object.byte_length());
    metadata.length = read_count(object, "length").or_else(|| object.typed_length());
}

/// Buffer-backed views with elements: typed arrays and host buffers, not DataViews.
fn is_element_view(object: &Object) -> bool {
    object.is_array_buffer_view() && !object.is_data_view()
}

fn read_count(object: &Object, key: &str) -> Option<usize> {
    match reflect::get(object, key)? {
        Value::Number(n) if n.is_finite() && n >= 0.0 => Some(n as usize),
        _ => None,
    }
}
