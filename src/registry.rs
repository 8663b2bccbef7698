//!
//! Provides the plugin registry the engine dispatches over, and the single
//! canonical function that builds the default one.
//!
//! ## Usage Workflow
//! ```rust
//! use prettifier::registry::{default_registry, PluginRegistry};
//! use prettifier::{Prettifier, Value};
//! // 1. Start from the default registry (or an empty one)
//! let mut registry = default_registry();
//! // 2. Add or replace plugins by name
//! registry.remove("str");
//! assert!(!registry.has("str"));
//! // 3. Hand the registry to an engine
//! let prettifier = Prettifier::with_registry(2, "\n", registry);
//! assert_eq!(prettifier.render(&Value::from(1), 0).unwrap(), "1");
//! ```
//!
//! ## Registry Invariant
//! A registry is assembled up front and never mutated by the engine. Plugin
//! discovery is the caller's concern; the engine only sees names and plugins.
//!

use im::HashMap;
use once_cell::sync::Lazy;

use crate::plugin::Plugin;
use crate::plugins;

/// Name → plugin mapping. Cloning is cheap (structural sharing).
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Plugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers a plugin, returning the one previously stored under `name`.
    pub fn register(&mut self, name: &str, plugin: Plugin) -> Option<Plugin> {
        self.plugins.insert(name.to_string(), plugin)
    }

    pub fn remove(&mut self, name: &str) -> Option<Plugin> {
        self.plugins.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Plugin)> + '_ {
        self.plugins.iter().map(|(name, plugin)| (name.as_str(), plugin))
    }
}

impl<S: Into<String>> FromIterator<(S, Plugin)> for PluginRegistry {
    fn from_iter<I: IntoIterator<Item = (S, Plugin)>>(iter: I) -> Self {
        Self {
            plugins: iter.into_iter().map(|(name, plugin)| (name.into(), plugin)).collect(),
        }
    }
}

static DEFAULT_REGISTRY: Lazy<PluginRegistry> = Lazy::new(|| {
    let mut registry = PluginRegistry::new();
    plugins::register_all_plugins(&mut registry);
    registry
});

/// Returns a registry holding every built-in plugin.
///
/// # Example
/// ```rust
/// use prettifier::registry::default_registry;
/// let registry = default_registry();
/// assert!(registry.has("object"));
/// assert!(!registry.has("record"));
/// ```
pub fn default_registry() -> PluginRegistry {
    DEFAULT_REGISTRY.clone()
}
