//! Settings store the host injects into plugins

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::declaration::SettingDefinition;
use crate::error::{PluginError, PluginResult};

/// Shared store for namespaced settings (`PLUGIN_<NAME>_<KEY>`).
///
/// The store is passed explicitly to whatever needs it; there is no
/// process-wide instance.
pub trait SettingsStore: Send + Sync {
    /// Define a setting, replacing an existing definition with the same key
    fn define(&self, key: &str, definition: SettingDefinition) -> PluginResult<()>;

    /// Definition of a setting
    fn definition(&self, key: &str) -> Option<SettingDefinition>;

    /// Stored value, or the declared default when nothing was stored
    fn get(&self, key: &str) -> Option<serde_yaml::Value>;

    /// Store a value for a defined setting
    fn set(&self, key: &str, value: serde_yaml::Value) -> PluginResult<()>;

    /// All defined keys
    fn keys(&self) -> Vec<String>;
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    definitions: RwLock<BTreeMap<String, SettingDefinition>>,
    values: RwLock<BTreeMap<String, serde_yaml::Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> PluginError {
    PluginError::Store("settings lock poisoned".to_string())
}

impl SettingsStore for InMemorySettingsStore {
    fn define(&self, key: &str, definition: SettingDefinition) -> PluginResult<()> {
        self.definitions
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), definition);
        Ok(())
    }

    fn definition(&self, key: &str) -> Option<SettingDefinition> {
        self.definitions.read().ok()?.get(key).cloned()
    }

    fn get(&self, key: &str) -> Option<serde_yaml::Value> {
        if let Some(value) = self.values.read().ok()?.get(key) {
            return Some(value.clone());
        }
        self.definition(key)?.default
    }

    fn set(&self, key: &str, value: serde_yaml::Value) -> PluginResult<()> {
        let definition = self
            .definition(key)
            .ok_or_else(|| PluginError::UnknownSetting(key.to_string()))?;

        definition
            .check(&value)
            .map_err(|reason| PluginError::InvalidSettingValue {
                key: key.to_string(),
                reason,
            })?;

        self.values
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.definitions
            .read()
            .map(|d| d.keys().cloned().collect())
            .unwrap_or_default()
    }
}
