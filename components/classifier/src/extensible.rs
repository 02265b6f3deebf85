//! User-extensible classifier.
//!
//! An [`ExtensibleClassifier`] keeps an ordered list of named rules in front
//! of a [`Classifier`]. Rules are tried newest first; the first predicate
//! that accepts the value names it. When no rule matches, the base
//! classifier decides.
//!
//! Rules come from [`ExtensibleClassifier::define_type`] or from a
//! [`Plugin`], which installs a batch of rules atomically: either every rule
//! is added or the registry is left untouched.

use std::fmt;
use std::sync::Arc;

use host_value::{Realm, Value};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::classifier::Classifier;
use crate::error::RegistryError;
use crate::tag::TypeTag;

/// A rule predicate. Must not fail; a rule that cannot decide returns `false`.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

type SetupHook = Arc<dyn Fn(&ExtensibleClassifier) + Send + Sync>;
type TeardownHook = Arc<dyn Fn() + Send + Sync>;

/// A named, versioned bundle of rules with optional lifecycle hooks.
///
/// # Examples
///
/// ```
/// use classifier::{ExtensibleClassifier, Plugin, PluginOptions};
/// use host_value::{Realm, Value};
///
/// let plugin = Plugin::new("units", "1.0.0")
///     .with_type("meters", |v: &Value| v.as_str().is_some_and(|s| s.ends_with('m')));
///
/// let classifier = ExtensibleClassifier::new(&Realm::new());
/// classifier
///     .register_plugin(plugin, PluginOptions::default().with_prefix("si."))
///     .unwrap();
///
/// assert_eq!(classifier.classify(&Value::from("12m")), "si.meters");
/// assert_eq!(classifier.classify(&Value::from("12")), "string");
/// ```
#[derive(Clone)]
pub struct Plugin {
    name: String,
    version: String,
    types: IndexMap<String, Predicate>,
    setup: Option<SetupHook>,
    teardown: Option<TeardownHook>,
}

impl Plugin {
    /// An empty plugin
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Plugin {
            name: name.into(),
            version: version.into(),
            types: IndexMap::new(),
            setup: None,
            teardown: None,
        }
    }

    /// Add a rule. Redefining a name within the same plugin replaces it in place.
    pub fn with_type<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.types.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Hook run once after the plugin's rules are installed
    pub fn on_setup<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ExtensibleClassifier) + Send + Sync + 'static,
    {
        self.setup = Some(Arc::new(hook));
        self
    }

    /// Hook run on unregistration, after the rules are removed
    pub fn on_teardown<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.teardown = Some(Arc::new(hook));
        self
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plugin version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Unprefixed rule names in declaration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}

/// How a plugin's rules are installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    /// Replace existing rules with the same name instead of failing
    pub override_existing: bool,
    /// Prepended to every rule name the plugin contributes
    pub prefix: Option<String>,
}

impl PluginOptions {
    /// Allow replacing existing rules
    pub fn overriding(mut self) -> Self {
        self.override_existing = true;
        self
    }

    /// Prefix every contributed rule name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn full_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }
}

#[derive(Clone)]
struct CustomRule {
    name: String,
    predicate: Predicate,
    owner: Option<String>,
}

/// Registry state, replaced wholesale on every mutation.
#[derive(Clone, Default)]
struct Registry {
    rules: Vec<CustomRule>,
    plugins: IndexMap<String, Plugin>,
}

impl Registry {
    fn has_type(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }
}

/// A classifier with user-defined rules that take precedence over the
/// built-in pipeline.
///
/// All methods take `&self`; hooks and predicates may call back into the
/// classifier, including registering further types from a setup hook.
///
/// # Examples
///
/// ```
/// use classifier::ExtensibleClassifier;
/// use host_value::{Realm, Value};
///
/// let classifier = ExtensibleClassifier::new(&Realm::new());
/// classifier
///     .define_type("even", |v: &Value| v.as_number().is_some_and(|n| n % 2.0 == 0.0))
///     .unwrap();
///
/// assert_eq!(classifier.classify(&Value::from(4)), "even");
/// assert_eq!(classifier.classify(&Value::from(3)), "number");
/// assert!(classifier.define_type("even", |_: &Value| true).is_err());
/// ```
pub struct ExtensibleClassifier {
    base: Classifier,
    registry: RwLock<Arc<Registry>>,
    // Serializes mutations so validation and commit see the same state.
    write_lock: Mutex<()>,
}

impl ExtensibleClassifier {
    /// An extensible classifier over a fresh [`Classifier`] for `realm`
    pub fn new(realm: &Realm) -> Self {
        Self::with_classifier(Classifier::new(realm))
    }

    /// Wrap an existing classifier; its cache is shared
    pub fn with_classifier(base: Classifier) -> Self {
        ExtensibleClassifier {
            base,
            registry: RwLock::new(Arc::new(Registry::default())),
            write_lock: Mutex::new(()),
        }
    }

    /// The fallback classifier
    pub fn base(&self) -> &Classifier {
        &self.base
    }

    fn snapshot(&self) -> Arc<Registry> {
        self.registry.read().clone()
    }

    fn commit(&self, registry: Registry) {
        *self.registry.write() = Arc::new(registry);
    }

    /// Classify: newest matching rule first, then the base classifier
    pub fn classify(&self, value: &Value) -> TypeTag {
        let registry = self.snapshot();
        for rule in registry.rules.iter().rev() {
            if (rule.predicate)(value) {
                trace!(rule = %rule.name, "custom rule matched");
                return TypeTag::from_name(&rule.name);
            }
        }
        self.base.classify(value)
    }

    /// Classify each value in order
    pub fn classify_many(&self, values: &[Value]) -> Vec<TypeTag> {
        values.iter().map(|value| self.classify(value)).collect()
    }

    /// Install every rule of `plugin`, then run its setup hook.
    ///
    /// Fails without changing anything if the plugin is already installed or
    /// any of its (prefixed) rule names exists and overriding is not allowed.
    pub fn register_plugin(
        &self,
        plugin: Plugin,
        options: PluginOptions,
    ) -> Result<(), RegistryError> {
        let setup = {
            let _guard = self.write_lock.lock();
            let mut registry = Registry::clone(&self.snapshot());

            if registry.plugins.contains_key(&plugin.name) {
                return Err(RegistryError::DuplicatePlugin(plugin.name.clone()));
            }
            let names: Vec<String> = plugin
                .type_names()
                .map(|name| options.full_name(name))
                .collect();
            if !options.override_existing {
                if let Some(taken) = names.iter().find(|name| registry.has_type(name)) {
                    return Err(RegistryError::DuplicateType(taken.clone()));
                }
            }

            for (name, predicate) in names.into_iter().zip(plugin.types.values()) {
                registry.rules.retain(|rule| rule.name != name);
                registry.rules.push(CustomRule {
                    name,
                    predicate: predicate.clone(),
                    owner: Some(plugin.name.clone()),
                });
            }
            debug!(
                plugin = %plugin.name,
                version = %plugin.version,
                types = plugin.types.len(),
                "plugin registered"
            );
            let setup = plugin.setup.clone();
            registry.plugins.insert(plugin.name.clone(), plugin);
            self.commit(registry);
            setup
        };

        if let Some(setup) = setup {
            setup(self);
        }
        Ok(())
    }

    /// Remove every rule the plugin installed, then run its teardown hook.
    ///
    /// The hook runs outside the registry lock and sees the registry without
    /// the plugin, so it may call back into the classifier.
    pub fn unregister_plugin(&self, name: &str) -> Result<(), RegistryError> {
        let teardown = {
            let _guard = self.write_lock.lock();
            let mut registry = Registry::clone(&self.snapshot());
            let Some(plugin) = registry.plugins.shift_remove(name) else {
                return Err(RegistryError::UnknownPlugin(name.to_string()));
            };
            let before = registry.rules.len();
            registry
                .rules
                .retain(|rule| rule.owner.as_deref() != Some(name));
            debug!(
                plugin = name,
                removed = before - registry.rules.len(),
                "plugin unregistered"
            );
            self.commit(registry);
            plugin.teardown
        };

        if let Some(teardown) = teardown {
            teardown();
        }
        Ok(())
    }

    /// Add a single rule with the highest precedence
    pub fn define_type<F>(&self, name: impl Into<String>, predicate: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let _guard = self.write_lock.lock();
        let mut registry = Registry::clone(&self.snapshot());
        if registry.has_type(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        debug!(rule = %name, "type defined");
        registry.rules.push(CustomRule {
            name,
            predicate: Arc::new(predicate),
            owner: None,
        });
        self.commit(registry);
        Ok(())
    }

    /// Remove a single rule, whoever installed it
    pub fn remove_type(&self, name: &str) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock();
        let mut registry = Registry::clone(&self.snapshot());
        let Some(index) = registry.rules.iter().position(|rule| rule.name == name) else {
            return Err(RegistryError::UnknownType(name.to_string()));
        };
        registry.rules.remove(index);
        debug!(rule = name, "type removed");
        self.commit(registry);
        Ok(())
    }

    /// Whether a rule with this name exists
    pub fn has_type(&self, name: &str) -> bool {
        self.snapshot().has_type(name)
    }

    /// Rule names in registration order
    pub fn list_custom_types(&self) -> Vec<String> {
        self.snapshot()
            .rules
            .iter()
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// Rule names in precedence order, newest first
    pub fn custom_types(&self) -> Vec<String> {
        let mut names = self.list_custom_types();
        names.reverse();
        names
    }

    /// Installed plugin names in installation order
    pub fn plugins(&self) -> Vec<String> {
        self.snapshot().plugins.keys().cloned().collect()
    }

    /// Whether a plugin with this name is installed
    pub fn has_plugin(&self, name: &str) -> bool {
        self.snapshot().plugins.contains_key(name)
    }
}

impl fmt::Debug for ExtensibleClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensibleClassifier")
            .field("base", &self.base)
            .field("rules", &self.list_custom_types())
            .field("plugins", &self.plugins())
            .finish()
    }
}
