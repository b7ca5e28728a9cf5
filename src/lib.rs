//! InvenTree Plugin Host Library
//!
//! Loads InvenTree integration plugins from YAML manifests, composes each one
//! from its declared mixins (settings, URLs, navigation) and exposes the
//! integration points they contribute: namespaced settings, URL mounts and
//! navigation links. Also carries the order-form catalogue and the barcode
//! plugin interface.

pub mod barcode;
pub mod cli;
pub mod config;
pub mod forms;
pub mod plugin;
pub mod utils;

pub use barcode::{BarcodePlugin, BarcodeRegistry, DigikeyBarcodePlugin};
pub use config::{Config, PluginConfig};
pub use forms::{FieldKind, FormError, FormField, FormSpec};
pub use plugin::{
    PluginManager, PluginManifest, PluginNavigationLink, PluginRegistry, RegistryEntry,
    RegistryPluginStatus,
};

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use inventree_plugin::{
    InMemorySettingsStore, IntegrationPlugin, MixinKind, PluginDeclaration,
    PluginLifecycleManager, PluginStatus, SettingDefinition, SettingsStore, UrlMount,
};

/// A namespaced setting with its current value
#[derive(Debug, Clone, serde::Serialize)]
pub struct SettingOverview {
    pub key: String,
    pub definition: SettingDefinition,
    pub value: Option<serde_yaml::Value>,
}

/// Main application context that coordinates all components
pub struct InvenTreePlugins {
    config: Config,
    settings: Arc<dyn SettingsStore>,
    plugin_manager: Arc<PluginManager>,
    registry: PluginRegistry,
}

impl InvenTreePlugins {
    /// Create a new instance backed by an in-memory settings store
    pub fn new(config: Config) -> Result<Self> {
        Self::with_settings_store(config, Arc::new(InMemorySettingsStore::new()))
    }

    /// Create a new instance that records plugin settings in `settings`
    pub fn with_settings_store(config: Config, settings: Arc<dyn SettingsStore>) -> Result<Self> {
        config.validate()?;

        let plugin_manager = Arc::new(PluginManager::new());
        let registry = PluginRegistry::new(Arc::clone(&plugin_manager), Arc::clone(&settings))
            .with_disabled(&config.plugins.disabled)
            .with_setting_overrides(config.settings.clone());

        Ok(Self {
            config,
            settings,
            plugin_manager,
            registry,
        })
    }

    /// Discover and load plugins.
    ///
    /// Configured setting overrides are stored as each plugin loads, including
    /// plugins enabled or registered later.
    pub async fn initialize_plugins(&self) -> Result<()> {
        info!("Initializing plugin system");

        if self.config.plugins.enable_external_discovery {
            for plugin_dir in &self.config.plugins.plugin_directories {
                let expanded_dir = utils::expand_path(plugin_dir)?;
                if expanded_dir.exists() {
                    info!("Adding plugin directory: {:?}", expanded_dir);
                    self.registry.add_plugin_directory(expanded_dir).await;
                } else {
                    info!("Plugin directory does not exist, skipping: {:?}", expanded_dir);
                }
            }
        } else {
            info!("External plugin discovery is disabled");
        }

        self.registry.initialize_plugins().await?;
        for key in self.registry.unmatched_setting_overrides() {
            warn!("Configured setting {} does not belong to a loaded plugin", key);
        }

        info!("Plugin system initialized successfully");
        Ok(())
    }

    /// Compose and load an in-process plugin.
    ///
    /// The plugin gets a registry entry without a manifest path, so it is
    /// listed, enabled and disabled like a discovered one and survives reloads.
    pub async fn register_plugin(
        &self,
        declaration: &dyn PluginDeclaration,
        mixins: &[MixinKind],
    ) -> Result<Arc<IntegrationPlugin>> {
        let manifest = PluginManifest::from_declaration(declaration, mixins);
        let name = manifest.name.clone();

        self.registry.add_manifest(manifest, None).await;
        self.registry.load_plugin(&name).await?;

        self.plugin_manager
            .get_plugin(&name)
            .await
            .ok_or_else(|| anyhow!("Plugin {} is disabled", name))
    }

    /// Status of every known plugin
    pub async fn get_plugin_info(&self) -> Result<Vec<PluginStatus>> {
        self.registry.get_plugin_status().await
    }

    pub async fn enable_plugin(&self, name: &str) -> Result<()> {
        self.registry.enable_plugin(name).await
    }

    pub async fn disable_plugin(&self, name: &str) -> Result<()> {
        self.registry.disable_plugin(name).await
    }

    /// Namespaced settings of all loaded plugins with their current values
    pub async fn settings_overview(&self) -> Vec<SettingOverview> {
        self.plugin_manager
            .settings_patterns()
            .await
            .into_iter()
            .map(|(key, definition)| SettingOverview {
                value: self.settings.get(&key),
                key,
                definition,
            })
            .collect()
    }

    /// URL mounts under the configured plugin URL prefix, keyed by base URL
    pub async fn url_mounts(&self) -> BTreeMap<String, UrlMount> {
        self.plugin_manager
            .plugins()
            .await
            .iter()
            .filter_map(|p| Some((p.base_url(self.config.plugin_url())?, p.urlpatterns()?)))
            .collect()
    }

    pub async fn navigation_links(&self) -> Vec<PluginNavigationLink> {
        self.plugin_manager.navigation_links().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    pub fn plugin_manager(&self) -> &Arc<PluginManager> {
        &self.plugin_manager
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}
