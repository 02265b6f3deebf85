//! Identity-keyed classification cache.
//!
//! Entries are keyed by the classifying realm's identity together with the
//! object identity, so one cache may be shared by classifiers of different
//! home realms without answers leaking between them. Entries hold only a
//! weak handle to the object, so the cache never keeps a classified object
//! alive. Dead entries
//! are swept once the map grows past a threshold, which then doubles.
//!
//! Storage is created lazily on the first write and dropped on `disable`.
//! Concurrent classifications of the same object may both miss and both
//! store; the last write wins and the tag is identical either way.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use host_value::{Object, Realm, WeakObject};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ClassifierConfig;
use crate::tag::TypeTag;

struct CacheEntry {
    target: WeakObject,
    tag: TypeTag,
}

/// Realm identity and object identity.
type CacheKey = (u64, usize);

struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    next_sweep: usize,
}

impl CacheState {
    fn new(sweep_threshold: usize) -> Self {
        CacheState {
            entries: HashMap::new(),
            next_sweep: sweep_threshold,
        }
    }
}

/// Hit/miss counters of a [`ClassificationCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to classification
    pub misses: u64,
    /// Live and not-yet-swept entries currently stored
    pub entries: usize,
}

/// Identity-keyed, non-owning cache of classification results.
///
/// # Examples
///
/// ```
/// use classifier::{ClassificationCache, TypeTag};
/// use host_value::Realm;
///
/// let realm = Realm::new();
/// let cache = ClassificationCache::new();
/// let map = realm.new_map(vec![]);
///
/// cache.store(&realm, &map, TypeTag::from("map"));
/// assert_eq!(cache.lookup(&realm, &map), Some(TypeTag::from("map")));
/// assert_eq!(cache.lookup(&Realm::new(), &map), None);
///
/// cache.disable();
/// assert_eq!(cache.lookup(&realm, &map), None);
/// ```
pub struct ClassificationCache {
    enabled: AtomicBool,
    sweep_threshold: usize,
    state: Mutex<Option<CacheState>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationCache {
    /// An enabled cache with the default sweep threshold
    pub fn new() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }

    /// A cache configured from `config`
    pub fn from_config(config: &ClassifierConfig) -> Self {
        ClassificationCache {
            enabled: AtomicBool::new(config.cache_enabled),
            sweep_threshold: config.sweep_threshold.max(1),
            state: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A cache that starts disabled
    pub fn disabled() -> Self {
        Self::from_config(&ClassifierConfig {
            cache_enabled: false,
            ..ClassifierConfig::default()
        })
    }

    /// Turn caching on and make sure storage exists
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        let mut state = self.state.lock();
        if state.is_none() {
            *state = Some(CacheState::new(self.sweep_threshold));
        }
        debug!("classification cache enabled");
    }

    /// Turn caching off and drop all entries
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        *self.state.lock() = None;
        debug!("classification cache disabled");
    }

    /// Drop all entries, keeping the cache enabled or disabled as it was
    pub fn clear(&self) {
        if let Some(state) = self.state.lock().as_mut() {
            state.entries.clear();
            state.next_sweep = self.sweep_threshold;
        }
        debug!("classification cache cleared");
    }

    /// Whether lookups and stores are active
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Number of stored entries, including dead ones not yet swept
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .as_ref()
            .map_or(0, |state| state.entries.len())
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counters since creation
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Cached tag for this exact object as classified from `realm`, if any
    pub fn lookup(&self, realm: &Realm, object: &Object) -> Option<TypeTag> {
        if !self.is_enabled() {
            return None;
        }
        let state = self.state.lock();
        let found = state
            .as_ref()
            .and_then(|state| state.entries.get(&(realm.identity(), object.identity())))
            .filter(|entry| entry.target.refers_to(object))
            .map(|entry| entry.tag.clone());
        drop(state);

        match &found {
            Some(tag) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(%tag, "classification cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
        }
        found
    }

    /// Remember the tag `realm` gave this object
    pub fn store(&self, realm: &Realm, object: &Object, tag: TypeTag) {
        if !self.is_enabled() {
            return;
        }
        let mut guard = self.state.lock();
        let state = guard.get_or_insert_with(|| CacheState::new(self.sweep_threshold));

        if state.entries.len() >= state.next_sweep {
            let before = state.entries.len();
            state.entries.retain(|_, entry| entry.target.is_alive());
            state.next_sweep = (state.entries.len() * 2).max(self.sweep_threshold);
            trace!(
                swept = before - state.entries.len(),
                remaining = state.entries.len(),
                "swept dead cache entries"
            );
        }

        state.entries.insert(
            (realm.identity(), object.identity()),
            CacheEntry {
                target: object.downgrade(),
                tag,
            },
        );
    }
}

impl std::fmt::Debug for ClassificationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationCache")
            .field("enabled", &self.is_enabled())
            .field("stats", &self.stats())
            .finish()
    }
}
