//! Settings mixin

use std::any::Any;
use std::collections::BTreeMap;

use crate::error::{PluginError, PluginResult};
use crate::traits::{
    Capability, PluginDeclaration, SettingDefinition, SettingsDeclaration, SettingsStore,
};

/// Custom settings declared by a plugin
#[derive(Debug, Clone)]
pub struct SettingsMixin {
    plugin_name: String,
    settings: Option<SettingsDeclaration>,
}

impl SettingsMixin {
    pub const KEY: &'static str = "settings";

    /// Read the plugin's settings declaration
    pub fn setup(declaration: &dyn PluginDeclaration) -> Self {
        Self {
            plugin_name: declaration.plugin_name().to_string(),
            settings: declaration.settings(),
        }
    }

    /// Declared settings, as written by the plugin
    pub fn settings(&self) -> Option<&SettingsDeclaration> {
        self.settings.as_ref()
    }

    /// Does this plugin use custom settings
    pub fn has_settings(&self) -> bool {
        self.settings.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Global key for one of this plugin's settings
    pub fn setting_key(&self, key: &str) -> String {
        format!("PLUGIN_{}_{}", self.plugin_name.to_uppercase(), key)
    }

    /// Declared settings keyed by their namespaced global key
    pub fn settingspatterns(&self) -> Option<BTreeMap<String, SettingDefinition>> {
        if !self.has_settings() {
            return None;
        }

        self.settings.as_ref().map(|settings| {
            settings
                .iter()
                .map(|(key, definition)| (self.setting_key(key), definition.clone()))
                .collect()
        })
    }

    /// Define every namespaced setting in `store`; returns how many were defined
    pub fn register_settings(&self, store: &dyn SettingsStore) -> PluginResult<usize> {
        let patterns = self.settingspatterns().unwrap_or_default();
        for (key, definition) in &patterns {
            store.define(key, definition.clone())?;
        }
        Ok(patterns.len())
    }

    /// Current value of one of this plugin's settings
    pub fn get_setting(
        &self,
        store: &dyn SettingsStore,
        key: &str,
    ) -> PluginResult<serde_yaml::Value> {
        let namespaced = self.setting_key(key);
        let declared = self
            .settings
            .as_ref()
            .and_then(|s| s.get(key))
            .ok_or_else(|| PluginError::UnknownSetting(namespaced.clone()))?;

        Ok(store
            .get(&namespaced)
            .or_else(|| declared.default.clone())
            .unwrap_or(serde_yaml::Value::Null))
    }

    /// Store a value for one of this plugin's settings
    pub fn set_setting(
        &self,
        store: &dyn SettingsStore,
        key: &str,
        value: serde_yaml::Value,
    ) -> PluginResult<()> {
        store.set(&self.setting_key(key), value)
    }
}

impl Capability for SettingsMixin {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn human_name(&self) -> &str {
        "Settings"
    }

    fn is_active(&self) -> bool {
        self.has_settings()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
