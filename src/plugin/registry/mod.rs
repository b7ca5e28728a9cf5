//! Plugin registry for managing plugin discovery and registration

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use inventree_plugin::{
    IntegrationPlugin, MixinKind, PluginLifecycleManager, PluginStatus, SettingsMixin,
    SettingsStore,
};

use super::{PluginManager, PluginManifest};
use crate::utils;

/// Plugin registry entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Plugin manifest
    pub manifest: PluginManifest,

    /// Manifest file path, if the plugin was discovered on disk
    pub manifest_path: Option<PathBuf>,

    /// Plugin status
    pub status: RegistryPluginStatus,

    /// Last loaded timestamp
    pub last_loaded: Option<chrono::DateTime<chrono::Utc>>,
}

/// Plugin status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryPluginStatus {
    /// Plugin is available
    Available,

    /// Plugin is loaded
    Loaded,

    /// Plugin has errors
    Error(String),

    /// Plugin is disabled
    Disabled,
}

impl fmt::Display for RegistryPluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryPluginStatus::Available => write!(f, "available"),
            RegistryPluginStatus::Loaded => write!(f, "loaded"),
            RegistryPluginStatus::Error(_) => write!(f, "error"),
            RegistryPluginStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// Plugin registry for managing plugins
pub struct PluginRegistry {
    /// Known plugins by name
    plugins: Arc<RwLock<BTreeMap<String, RegistryEntry>>>,

    /// Plugin directories
    plugin_dirs: Arc<RwLock<Vec<PathBuf>>>,

    /// Names of plugins disabled by configuration
    disabled: HashSet<String>,

    /// Plugin manager
    plugin_manager: Arc<PluginManager>,

    /// Store receiving the settings of loaded plugins
    settings: Arc<dyn SettingsStore>,

    /// Configured values for namespaced settings, applied whenever a plugin loads
    setting_overrides: BTreeMap<String, serde_yaml::Value>,
}

impl PluginRegistry {
    /// Create a new plugin registry
    pub fn new(plugin_manager: Arc<PluginManager>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            plugins: Arc::new(RwLock::new(BTreeMap::new())),
            plugin_dirs: Arc::new(RwLock::new(Vec::new())),
            disabled: HashSet::new(),
            plugin_manager,
            settings,
            setting_overrides: BTreeMap::new(),
        }
    }

    /// Mark plugin names as disabled; matching is case-insensitive
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disabled = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Values to store for namespaced settings once their plugin is loaded
    pub fn with_setting_overrides(
        mut self,
        overrides: BTreeMap<String, serde_yaml::Value>,
    ) -> Self {
        self.setting_overrides = overrides;
        self
    }

    pub fn plugin_manager(&self) -> &Arc<PluginManager> {
        &self.plugin_manager
    }

    /// Add a plugin directory
    pub async fn add_plugin_directory(&self, dir: PathBuf) {
        self.plugin_dirs.write().await.push(dir);
    }

    /// Discover plugins in registered directories; returns how many manifests were added
    pub async fn discover_plugins(&self) -> Result<usize> {
        let plugin_dirs = self.plugin_dirs.read().await.clone();
        let mut discovered = 0;
        for plugin_dir in &plugin_dirs {
            discovered += self.scan_plugin_directory(plugin_dir).await?;
        }
        Ok(discovered)
    }

    /// Scan a plugin directory for plugins
    async fn scan_plugin_directory(&self, plugin_dir: &Path) -> Result<usize> {
        if !plugin_dir.exists() {
            return Ok(0);
        }

        info!("Scanning plugin directory: {:?}", plugin_dir);

        let mut loaded = 0;
        for path in utils::find_manifest_files(plugin_dir) {
            info!("Found plugin manifest: {:?}", path);
            match self.load_plugin_manifest(&path).await {
                Ok(_) => {
                    info!("Successfully loaded plugin manifest: {:?}", path);
                    loaded += 1;
                }
                Err(e) => {
                    warn!("Failed to load plugin manifest {:?}: {}", path, e);
                }
            }
        }

        Ok(loaded)
    }

    /// Load a plugin manifest
    async fn load_plugin_manifest(&self, manifest_path: &Path) -> Result<()> {
        let content = tokio::fs::read_to_string(manifest_path).await?;
        let manifest = PluginManifest::parse(&content)?;
        self.add_manifest(manifest, Some(manifest_path.to_path_buf()))
            .await;
        Ok(())
    }

    /// Add a manifest to the registry; it is loaded by [`PluginRegistry::load_plugin`].
    ///
    /// Rediscovering a known manifest at the same path keeps its runtime state.
    pub async fn add_manifest(&self, manifest: PluginManifest, manifest_path: Option<PathBuf>) {
        let mut status = if self.disabled.contains(&manifest.name.to_lowercase()) {
            RegistryPluginStatus::Disabled
        } else {
            RegistryPluginStatus::Available
        };
        let mut last_loaded = None;

        let name = manifest.name.clone();
        let mut plugins = self.plugins.write().await;
        match plugins.get(&name) {
            Some(existing)
                if manifest_path.is_some() && existing.manifest_path == manifest_path =>
            {
                status = if existing.status == RegistryPluginStatus::Disabled {
                    RegistryPluginStatus::Disabled
                } else {
                    RegistryPluginStatus::Available
                };
                last_loaded = existing.last_loaded;
            }
            Some(_) => {
                warn!("Plugin {} declared more than once; keeping the last manifest", name);
            }
            None => {}
        }

        plugins.insert(
            name,
            RegistryEntry {
                manifest,
                manifest_path,
                status,
                last_loaded,
            },
        );
    }

    /// Compose a plugin and hand it to the plugin manager.
    ///
    /// A plugin whose composition fails is marked as errored and stays unloaded.
    pub async fn load_plugin(&self, name: &str) -> Result<()> {
        let mut plugins = self.plugins.write().await;
        let entry = plugins
            .get_mut(name)
            .ok_or_else(|| anyhow!("Plugin {} not found", name))?;

        if entry.status == RegistryPluginStatus::Disabled {
            info!("Plugin {} is disabled, not loading", name);
            return Ok(());
        }

        let plugin = match entry.manifest.compose() {
            Ok(plugin) => plugin,
            Err(e) => {
                entry.status = RegistryPluginStatus::Error(e.to_string());
                return Err(e.into());
            }
        };

        if let Some(settings) = plugin.settings_mixin() {
            if let Err(e) = register_settings(settings, self.settings.as_ref()) {
                entry.status = RegistryPluginStatus::Error(e.to_string());
                return Err(e);
            }
        }

        self.apply_setting_overrides(&plugin);
        self.plugin_manager.register_plugin(plugin).await;
        entry.status = RegistryPluginStatus::Loaded;
        entry.last_loaded = Some(chrono::Utc::now());

        Ok(())
    }

    /// Store the configured values of a plugin's settings
    fn apply_setting_overrides(&self, plugin: &IntegrationPlugin) {
        let Some(patterns) = plugin.settingspatterns() else {
            return;
        };

        for key in patterns.keys() {
            if let Some(value) = self.setting_overrides.get(key) {
                if let Err(e) = self.settings.set(key, value.clone()) {
                    warn!("Ignoring configured setting {}: {}", key, e);
                }
            }
        }
    }

    /// Setting overrides that name no setting of a loaded plugin
    pub fn unmatched_setting_overrides(&self) -> Vec<&str> {
        self.setting_overrides
            .keys()
            .filter(|key| self.settings.definition(key).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Get all registered plugins
    pub async fn get_plugins(&self) -> Vec<RegistryEntry> {
        let plugins = self.plugins.read().await;
        plugins.values().cloned().collect()
    }

    /// Get plugin by name
    pub async fn get_plugin(&self, name: &str) -> Option<RegistryEntry> {
        let plugins = self.plugins.read().await;
        plugins.get(name).cloned()
    }

    /// Enable a plugin and load it
    pub async fn enable_plugin(&self, name: &str) -> Result<()> {
        {
            let mut plugins = self.plugins.write().await;
            let entry = plugins
                .get_mut(name)
                .ok_or_else(|| anyhow!("Plugin {} not found", name))?;

            if entry.status == RegistryPluginStatus::Loaded {
                return Ok(());
            }
            entry.status = RegistryPluginStatus::Available;
        }

        self.load_plugin(name).await
    }

    /// Disable a plugin and unload it
    pub async fn disable_plugin(&self, name: &str) -> Result<()> {
        let mut plugins = self.plugins.write().await;
        let entry = plugins
            .get_mut(name)
            .ok_or_else(|| anyhow!("Plugin {} not found", name))?;

        entry.status = RegistryPluginStatus::Disabled;
        self.plugin_manager.unregister_plugin(name).await;

        Ok(())
    }

    /// Get plugins whose manifest uses a mixin
    pub async fn get_plugins_by_mixin(&self, kind: MixinKind) -> Vec<RegistryEntry> {
        let plugins = self.plugins.read().await;

        plugins
            .values()
            .filter(|entry| entry.manifest.uses_mixin(kind))
            .cloned()
            .collect()
    }

    /// Load every available plugin; returns (loaded, failed)
    async fn load_available(&self) -> (usize, usize) {
        let mut loaded_count = 0;
        let mut error_count = 0;

        for plugin in self.get_plugins().await {
            if plugin.status != RegistryPluginStatus::Available {
                continue;
            }

            match self.load_plugin(&plugin.manifest.name).await {
                Ok(_) => {
                    info!("Successfully loaded plugin: {}", plugin.manifest.name);
                    loaded_count += 1;
                }
                Err(e) => {
                    warn!("Failed to load plugin {}: {}", plugin.manifest.name, e);
                    error_count += 1;
                }
            }
        }

        (loaded_count, error_count)
    }
}

fn register_settings(settings: &SettingsMixin, store: &dyn SettingsStore) -> Result<()> {
    let defined = settings.register_settings(store)?;
    if defined > 0 {
        info!("Defined {} plugin settings", defined);
    }
    Ok(())
}

#[async_trait]
impl PluginLifecycleManager for PluginRegistry {
    async fn initialize_plugins(&self) -> Result<()> {
        info!("Starting plugin discovery and loading process");

        let discovered = self.discover_plugins().await?;
        info!("Discovered {} plugin manifests", discovered);

        let (loaded_count, error_count) = self.load_available().await;
        info!(
            "Plugin discovery completed: {} loaded, {} errors",
            loaded_count, error_count
        );
        Ok(())
    }

    async fn reload_plugins(&self) -> Result<()> {
        info!("Reloading plugins");

        self.plugin_manager.clear().await;
        {
            let mut plugins = self.plugins.write().await;
            for entry in plugins.values_mut() {
                if entry.status != RegistryPluginStatus::Disabled {
                    entry.status = RegistryPluginStatus::Available;
                }
            }
        }

        self.initialize_plugins().await
    }

    async fn get_plugin_status(&self) -> Result<Vec<PluginStatus>> {
        let mut statuses = Vec::new();

        for entry in self.get_plugins().await {
            let capabilities = match self.plugin_manager.get_plugin(&entry.manifest.name).await {
                Some(plugin) => plugin.list_capabilities(false),
                None => Vec::new(),
            };

            let error = match &entry.status {
                RegistryPluginStatus::Error(message) => Some(message.clone()),
                _ => None,
            };

            statuses.push(PluginStatus {
                name: entry.manifest.name.clone(),
                status: entry.status.to_string(),
                capabilities,
                last_activity: entry.last_loaded,
                error,
            });
        }

        Ok(statuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventree_plugin::InMemorySettingsStore;
    use tempfile::TempDir;

    fn registry() -> PluginRegistry {
        PluginRegistry::new(
            Arc::new(PluginManager::new()),
            Arc::new(InMemorySettingsStore::new()),
        )
    }

    const SETTINGS_PLUGIN: &str = r#"
name: Sample
mixins: [settings]
settings:
  API_KEY:
    name: API Key
    default: none
"#;

    const BROKEN_PLUGIN: &str = r#"
name: Broken
mixins: [navigation]
navigation:
  - link: "/broken"
"#;

    #[tokio::test]
    async fn test_plugin_registry() {
        let registry = registry();
        let plugins = registry.get_plugins().await;
        assert!(plugins.is_empty());
    }

    #[tokio::test]
    async fn test_discover_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let sample = temp_dir.path().join("sample");
        let broken = temp_dir.path().join("broken");
        std::fs::create_dir_all(&sample).unwrap();
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(sample.join("plugin.yaml"), SETTINGS_PLUGIN).unwrap();
        std::fs::write(broken.join("plugin.yml"), BROKEN_PLUGIN).unwrap();
        std::fs::write(temp_dir.path().join("plugin.yaml"), "not: [valid").unwrap();

        let settings = Arc::new(InMemorySettingsStore::new());
        let registry = PluginRegistry::new(Arc::new(PluginManager::new()), settings.clone());
        registry.add_plugin_directory(temp_dir.path().to_path_buf()).await;
        registry.initialize_plugins().await.unwrap();

        let sample = registry.get_plugin("Sample").await.unwrap();
        assert_eq!(sample.status, RegistryPluginStatus::Loaded);
        assert!(sample.last_loaded.is_some());
        assert_eq!(
            settings.get("PLUGIN_SAMPLE_API_KEY"),
            Some(serde_yaml::Value::String("none".to_string()))
        );

        let broken = registry.get_plugin("Broken").await.unwrap();
        assert!(matches!(broken.status, RegistryPluginStatus::Error(_)));
        assert!(registry.plugin_manager().get_plugin("Broken").await.is_none());

        let statuses = registry.get_plugin_status().await.unwrap();
        assert_eq!(statuses.len(), 2);
        let sample_status = statuses.iter().find(|s| s.name == "Sample").unwrap();
        assert_eq!(sample_status.status, "loaded");
        assert_eq!(sample_status.capabilities.len(), 1);
        let broken_status = statuses.iter().find(|s| s.name == "Broken").unwrap();
        assert!(broken_status.error.as_deref().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_disabled_plugins_not_loaded() {
        let registry = registry().with_disabled(["sample"]);
        registry
            .add_manifest(PluginManifest::parse(SETTINGS_PLUGIN).unwrap(), None)
            .await;
        registry.initialize_plugins().await.unwrap();

        let entry = registry.get_plugin("Sample").await.unwrap();
        assert_eq!(entry.status, RegistryPluginStatus::Disabled);
        assert!(registry.plugin_manager().plugins().await.is_empty());

        registry.enable_plugin("Sample").await.unwrap();
        assert!(registry.plugin_manager().get_plugin("Sample").await.is_some());

        registry.disable_plugin("Sample").await.unwrap();
        assert!(registry.plugin_manager().get_plugin("Sample").await.is_none());
        assert!(registry.enable_plugin("Missing").await.is_err());
    }

    #[tokio::test]
    async fn test_reload_keeps_disabled() {
        let registry = registry();
        registry
            .add_manifest(PluginManifest::parse(SETTINGS_PLUGIN).unwrap(), None)
            .await;
        registry.initialize_plugins().await.unwrap();
        registry.disable_plugin("Sample").await.unwrap();

        registry.reload_plugins().await.unwrap();
        let entry = registry.get_plugin("Sample").await.unwrap();
        assert_eq!(entry.status, RegistryPluginStatus::Disabled);
    }

    #[tokio::test]
    async fn test_reload_keeps_runtime_disabled_after_rediscovery() {
        let temp_dir = TempDir::new().unwrap();
        let sample = temp_dir.path().join("sample");
        std::fs::create_dir_all(&sample).unwrap();
        std::fs::write(sample.join("plugin.yaml"), SETTINGS_PLUGIN).unwrap();

        let registry = registry();
        registry.add_plugin_directory(temp_dir.path().to_path_buf()).await;
        registry.initialize_plugins().await.unwrap();
        registry.disable_plugin("Sample").await.unwrap();

        registry.reload_plugins().await.unwrap();

        let entry = registry.get_plugin("Sample").await.unwrap();
        assert_eq!(entry.status, RegistryPluginStatus::Disabled);
        assert!(entry.last_loaded.is_some());
        assert!(registry.plugin_manager().get_plugin("Sample").await.is_none());
        assert_eq!(registry.get_plugins().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_runtime_enabled_after_rediscovery() {
        let temp_dir = TempDir::new().unwrap();
        let sample = temp_dir.path().join("sample");
        std::fs::create_dir_all(&sample).unwrap();
        std::fs::write(sample.join("plugin.yaml"), SETTINGS_PLUGIN).unwrap();

        let registry = registry().with_disabled(["Sample"]);
        registry.add_plugin_directory(temp_dir.path().to_path_buf()).await;
        registry.initialize_plugins().await.unwrap();
        registry.enable_plugin("Sample").await.unwrap();

        registry.reload_plugins().await.unwrap();

        let entry = registry.get_plugin("Sample").await.unwrap();
        assert_eq!(entry.status, RegistryPluginStatus::Loaded);
        assert!(registry.plugin_manager().get_plugin("Sample").await.is_some());
    }

    #[tokio::test]
    async fn test_setting_overrides_applied_when_enabled_later() {
        let settings = Arc::new(InMemorySettingsStore::new());
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "PLUGIN_SAMPLE_API_KEY".to_string(),
            serde_yaml::Value::String("secret".to_string()),
        );
        overrides.insert(
            "PLUGIN_OTHER_KEY".to_string(),
            serde_yaml::Value::Bool(true),
        );

        let registry = PluginRegistry::new(Arc::new(PluginManager::new()), settings.clone())
            .with_disabled(["Sample"])
            .with_setting_overrides(overrides);
        registry
            .add_manifest(PluginManifest::parse(SETTINGS_PLUGIN).unwrap(), None)
            .await;
        registry.initialize_plugins().await.unwrap();
        assert_eq!(settings.get("PLUGIN_SAMPLE_API_KEY"), None);

        registry.enable_plugin("Sample").await.unwrap();
        assert_eq!(
            settings.get("PLUGIN_SAMPLE_API_KEY"),
            Some(serde_yaml::Value::String("secret".to_string()))
        );
        assert_eq!(registry.unmatched_setting_overrides(), vec!["PLUGIN_OTHER_KEY"]);
    }

    #[tokio::test]
    async fn test_plugins_by_mixin() {
        let registry = registry();
        registry
            .add_manifest(PluginManifest::parse(SETTINGS_PLUGIN).unwrap(), None)
            .await;
        registry
            .add_manifest(PluginManifest::parse(BROKEN_PLUGIN).unwrap(), None)
            .await;

        let settings = registry.get_plugins_by_mixin(MixinKind::Settings).await;
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].manifest.name, "Sample");
        assert!(registry.get_plugins_by_mixin(MixinKind::Urls).await.is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RegistryPluginStatus::Loaded.to_string(), "loaded");
        assert_eq!(
            RegistryPluginStatus::Error("boom".to_string()).to_string(),
            "error"
        );
    }
}
