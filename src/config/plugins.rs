//! Plugin discovery configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin directories to scan for plugin manifests
    pub plugin_directories: Vec<PathBuf>,

    /// Whether to scan plugin directories at all
    pub enable_external_discovery: bool,

    /// Names of plugins that are discovered but never loaded
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl PluginConfig {
    pub fn validate(&self) -> Result<()> {
        if self
            .plugin_directories
            .iter()
            .any(|dir| dir.as_os_str().is_empty())
        {
            return Err(anyhow!("Plugin directory paths cannot be empty"));
        }

        if self.disabled.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("Disabled plugin names cannot be empty"));
        }

        Ok(())
    }

    /// Whether a plugin is disabled by configuration
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// Add or remove a plugin from the disabled list
    pub fn set_disabled(&mut self, name: &str, disabled: bool) {
        if disabled {
            if !self.is_disabled(name) {
                self.disabled.push(name.to_string());
            }
        } else {
            self.disabled.retain(|d| !d.eq_ignore_ascii_case(name));
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            plugin_directories: vec![
                PathBuf::from("./plugins"),
                PathBuf::from("~/.config/inventree/plugins"),
            ],
            enable_external_discovery: true,
            disabled: Vec::new(),
        }
    }
}
