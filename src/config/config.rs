//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::PluginConfig;

fn default_plugin_url() -> String {
    "plugin".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// URL prefix plugin routes are mounted below
    #[serde(default = "default_plugin_url")]
    pub plugin_url: String,

    /// Plugin configuration
    #[serde(default)]
    pub plugins: PluginConfig,

    /// Values for namespaced plugin settings (`PLUGIN_<NAME>_<KEY>`)
    #[serde(default)]
    pub settings: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        if self.plugin_url.trim_matches('/').is_empty() {
            return Err(anyhow!("Plugin URL prefix cannot be empty"));
        }

        if let Some(key) = self.settings.keys().find(|k| !k.starts_with("PLUGIN_")) {
            return Err(anyhow!(
                "Setting {} is not a plugin setting (expected PLUGIN_<NAME>_<KEY>)",
                key
            ));
        }

        self.plugins.validate()?;

        Ok(())
    }

    /// Plugin URL prefix without surrounding slashes
    pub fn plugin_url(&self) -> &str {
        self.plugin_url.trim_matches('/')
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            plugin_url: default_plugin_url(),
            plugins: PluginConfig::default(),
            settings: BTreeMap::new(),
        }
    }
}
