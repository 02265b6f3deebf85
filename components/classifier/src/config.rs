//! Classifier and inspector configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`Classifier`](crate::Classifier).
///
/// # Examples
///
/// ```
/// use classifier::ClassifierConfig;
///
/// let config = ClassifierConfig::from_json(r#"{ "cacheEnabled": false }"#).unwrap();
/// assert!(!config.cache_enabled);
/// assert_eq!(config.sweep_threshold, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Whether the identity cache starts enabled
    pub cache_enabled: bool,
    /// Entry count after which dead cache entries are pruned
    pub sweep_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            cache_enabled: true,
            sweep_threshold: 1024,
        }
    }
}

impl ClassifierConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Layout limits for [`inspect`](crate::inspect::inspect).
///
/// # Examples
///
/// ```
/// use classifier::InspectOptions;
///
/// let options = InspectOptions::from_json(r#"{ "depth": 0, "sorted": true }"#).unwrap();
/// assert_eq!(options.depth, 0);
/// assert_eq!(options.break_length, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InspectOptions {
    /// Nesting levels rendered before objects collapse to `[Object]`
    pub depth: usize,
    /// Elements or entries shown per array, map or set
    pub max_array_length: usize,
    /// Characters shown per string before it is cut with `...`
    pub max_string_length: usize,
    /// Width up to which arrays and objects stay on one line
    pub break_length: usize,
    /// Never break arrays and objects across lines
    pub compact: bool,
    /// Render object keys in sorted order
    pub sorted: bool,
    /// Also render symbol-keyed properties
    pub show_hidden: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        InspectOptions {
            depth: 2,
            max_array_length: 100,
            max_string_length: 200,
            break_length: 80,
            compact: false,
            sorted: false,
            show_hidden: false,
        }
    }
}

impl InspectOptions {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
