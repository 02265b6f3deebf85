//! Classification orchestrator.
//!
//! Composes the primitive, internal-tag, modern-type and typed-array
//! classifiers into one decision procedure and owns the identity cache.
//!
//! Precedence: a specific internal tag always wins. Only when it is the
//! generic `object` tag do the heuristics run, modern checks before the
//! typed-array check, then the custom tag or constructor name.

use std::fmt;
use std::sync::Arc;

use host_value::{Object, Realm, Value};
use tracing::trace;

use crate::cache::{CacheStats, ClassificationCache};
use crate::config::ClassifierConfig;
use crate::internal_tag::{classify_by_internal_tag, custom_type};
use crate::modern::{classify_modern, ProxyHeuristic, TagProxyHeuristic};
use crate::primitive::classify_primitive;
use crate::tag::{BuiltinType, TypeTag};
use crate::typed_array::classify_typed_array;

/// The classifier: maps any host value to exactly one [`TypeTag`].
///
/// Cloning is cheap; clones share the realm and the cache.
///
/// # Examples
///
/// ```
/// use classifier::Classifier;
/// use host_value::{Realm, TypedArrayKind, Value};
///
/// let realm = Realm::new();
/// let classifier = Classifier::new(&realm);
///
/// assert_eq!(classifier.classify(&Value::Null), "null");
/// assert_eq!(classifier.classify(&realm.new_map(vec![]).into()), "map");
///
/// let ints = Value::from(realm.new_typed_array(TypedArrayKind::Int32, 4));
/// assert_eq!(classifier.classify(&ints), "int32array");
/// assert_eq!(classifier.fast_classify(&ints), "object");
/// ```
#[derive(Clone)]
pub struct Classifier {
    realm: Realm,
    cache: Arc<ClassificationCache>,
    proxy_heuristic: Arc<dyn ProxyHeuristic>,
}

/// Builder for a [`Classifier`] with injected cache or proxy heuristic.
pub struct ClassifierBuilder {
    realm: Realm,
    config: ClassifierConfig,
    cache: Option<Arc<ClassificationCache>>,
    proxy_heuristic: Arc<dyn ProxyHeuristic>,
}

impl ClassifierBuilder {
    /// Start building a classifier whose home realm is `realm`
    pub fn new(realm: &Realm) -> Self {
        ClassifierBuilder {
            realm: realm.clone(),
            config: ClassifierConfig::default(),
            cache: None,
            proxy_heuristic: Arc::new(TagProxyHeuristic),
        }
    }

    /// Configuration used when no cache is injected
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing cache.
    ///
    /// Entries are keyed per home realm, so classifiers of different realms
    /// may share one cache without seeing each other's answers.
    pub fn cache(mut self, cache: Arc<ClassificationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the best-effort proxy detection
    pub fn proxy_heuristic(mut self, heuristic: impl ProxyHeuristic + 'static) -> Self {
        self.proxy_heuristic = Arc::new(heuristic);
        self
    }

    /// Finish building
    pub fn build(self) -> Classifier {
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(ClassificationCache::from_config(&self.config)));
        Classifier {
            realm: self.realm,
            cache,
            proxy_heuristic: self.proxy_heuristic,
        }
    }
}

impl Classifier {
    /// A classifier with default configuration and its own cache
    pub fn new(realm: &Realm) -> Self {
        ClassifierBuilder::new(realm).build()
    }

    /// A classifier configured from `config`
    pub fn with_config(realm: &Realm, config: ClassifierConfig) -> Self {
        ClassifierBuilder::new(realm).config(config).build()
    }

    /// Builder for custom setups
    pub fn builder(realm: &Realm) -> ClassifierBuilder {
        ClassifierBuilder::new(realm)
    }

    /// The home realm whose intrinsics identity checks compare against
    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    /// The identity cache
    pub fn cache(&self) -> &Arc<ClassificationCache> {
        &self.cache
    }

    /// Classify with full precision. Never fails.
    pub fn classify(&self, value: &Value) -> TypeTag {
        if let Some(primitive) = classify_primitive(value) {
            return primitive.into();
        }
        let Value::Object(object) = value else {
            return BuiltinType::Object.into();
        };

        // Only plain objects are cached, never functions.
        let cacheable = value.type_of() == "object";
        if cacheable {
            if let Some(tag) = self.cache.lookup(&self.realm, object) {
                return tag;
            }
        }

        let tag = self.classify_object(value, object);
        if cacheable {
            self.cache.store(&self.realm, object, tag.clone());
        }
        tag
    }

    fn classify_object(&self, value: &Value, object: &Object) -> TypeTag {
        let tag = classify_by_internal_tag(&self.realm, value);
        if !tag.is_generic_object() {
            trace!(%tag, stage = "internal-tag", "classified");
            return tag;
        }
        if let Some(builtin) = classify_modern(&self.realm, self.proxy_heuristic.as_ref(), value) {
            trace!(tag = %builtin, stage = "modern", "classified");
            return builtin.into();
        }
        if let Some(builtin) = classify_typed_array(value) {
            trace!(tag = %builtin, stage = "typed-array", "classified");
            return builtin.into();
        }
        if let Some(custom) = custom_type(&self.realm, object) {
            trace!(tag = %custom, stage = "custom", "classified");
            return custom;
        }
        BuiltinType::Object.into()
    }

    /// Coarse classification without cache or heuristics.
    ///
    /// Recognizes primitives, arrays, dates, regexps and errors; every other
    /// object collapses to `object` or `function`.
    pub fn fast_classify(&self, value: &Value) -> TypeTag {
        if let Some(primitive) = classify_primitive(value) {
            return primitive.into();
        }
        let Value::Object(object) = value else {
            return BuiltinType::Object.into();
        };

        let intrinsics = self.realm.intrinsics();
        let inherits = |prototype: &Object| object.instance_of(prototype).unwrap_or(false);
        let builtin = if object.is_array().unwrap_or(false) {
            BuiltinType::Array
        } else if inherits(&intrinsics.date_prototype) {
            BuiltinType::Date
        } else if inherits(&intrinsics.regexp_prototype) {
            BuiltinType::RegExp
        } else if inherits(&intrinsics.error_prototype) {
            BuiltinType::Error
        } else if object.is_callable() {
            BuiltinType::Function
        } else {
            BuiltinType::Object
        };
        builtin.into()
    }

    /// Classify each value in order
    pub fn classify_many(&self, values: &[Value]) -> Vec<TypeTag> {
        values.iter().map(|value| self.classify(value)).collect()
    }

    /// Enable the cache
    pub fn enable_cache(&self) {
        self.cache.enable();
    }

    /// Disable the cache and drop its entries
    pub fn disable_cache(&self) {
        self.cache.disable();
    }

    /// Drop all cached entries
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("realm", &self.realm)
            .field("cache", &self.cache)
            .field("proxy_heuristic", &self.proxy_heuristic)
            .finish()
    }
}
