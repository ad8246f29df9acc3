//! Process-wide `(type, name) -> factory` registry

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use super::{FORMATTER_PLUGIN_TYPE, Factory, LOG_PLUGIN_TYPE};
use crate::encoder::{ConsoleFormatter, FORMATTER_CONSOLE, FORMATTER_JSON, JsonFormatter};
use crate::logger::LoggerFactory;
use crate::registry::DEFAULT_LOGGER_NAME;

/// Two-level plugin table: capability type, then name
///
/// Thread-safety is provided by the global instance behind [`register`] and
/// [`get`]; the table itself is a plain map.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, HashMap<String, Arc<dyn Factory>>>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in formatters and logger factory
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert(FORMATTER_CONSOLE, Arc::new(ConsoleFormatter));
        registry.insert(FORMATTER_JSON, Arc::new(JsonFormatter));
        registry.insert(DEFAULT_LOGGER_NAME, Arc::new(LoggerFactory));
        registry
    }

    /// Register or replace a factory under its own type and `name`
    pub fn insert(&mut self, name: impl Into<String>, factory: Arc<dyn Factory>) {
        self.plugins
            .entry(factory.type_name().to_string())
            .or_default()
            .insert(name.into(), factory);
    }

    /// Look up a factory
    pub fn get(&self, type_name: &str, name: &str) -> Option<Arc<dyn Factory>> {
        self.plugins.get(type_name)?.get(name).cloned()
    }

    /// Names registered under a capability type, sorted
    pub fn names(&self, type_name: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .plugins
            .get(type_name)
            .map(|bucket| bucket.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Number of registered factories across all types
    pub fn len(&self) -> usize {
        self.plugins.values().map(HashMap::len).sum()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("count", &self.len())
            .field("formatters", &self.names(FORMATTER_PLUGIN_TYPE))
            .field("loggers", &self.names(LOG_PLUGIN_TYPE))
            .finish()
    }
}

/// Global static registry instance
static PLUGINS: LazyLock<RwLock<PluginRegistry>> =
    LazyLock::new(|| RwLock::new(PluginRegistry::with_builtins()));

/// Register a factory under `factory.type_name()` and `name`
///
/// Registering the same type and name twice replaces the earlier factory.
pub fn register(name: &str, factory: Arc<dyn Factory>) {
    tracing::debug!(type_name = factory.type_name(), name, "registering plugin");
    PLUGINS.write().insert(name, factory);
}

/// Look up a factory by capability type and name
pub fn get(type_name: &str, name: &str) -> Option<Arc<dyn Factory>> {
    PLUGINS.read().get(type_name, name)
}
