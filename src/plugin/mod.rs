//! Plugin host: loaded integration plugins and the integration points they expose

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use inventree_plugin::{IntegrationPlugin, NavigationLink, SettingDefinition, UrlMount};

pub mod manifest;
pub mod registry;

pub use manifest::PluginManifest;
pub use registry::*;

/// A navigation link together with the plugin that declared it
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PluginNavigationLink {
    /// Declaring plugin
    pub plugin: String,

    /// The link itself
    #[serde(flatten)]
    pub link: NavigationLink,
}

/// Plugin manager holding every loaded plugin instance
pub struct PluginManager {
    /// Loaded plugins by name
    plugins: Arc<RwLock<BTreeMap<String, Arc<IntegrationPlugin>>>>,
}

impl PluginManager {
    /// Create a new plugin manager
    pub fn new() -> Self {
        Self {
            plugins: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Register a composed plugin, replacing one with the same name
    pub async fn register_plugin(&self, plugin: IntegrationPlugin) -> Arc<IntegrationPlugin> {
        let plugin = Arc::new(plugin);
        info!("Registering plugin: {}", plugin.plugin_name());
        self.plugins
            .write()
            .await
            .insert(plugin.plugin_name().to_string(), Arc::clone(&plugin));
        plugin
    }

    /// Remove a plugin
    pub async fn unregister_plugin(&self, name: &str) -> Option<Arc<IntegrationPlugin>> {
        self.plugins.write().await.remove(name)
    }

    /// Remove every plugin
    pub async fn clear(&self) {
        self.plugins.write().await.clear();
    }

    /// Get a plugin by name
    pub async fn get_plugin(&self, name: &str) -> Option<Arc<IntegrationPlugin>> {
        self.plugins.read().await.get(name).cloned()
    }

    /// All loaded plugins, ordered by name
    pub async fn plugins(&self) -> Vec<Arc<IntegrationPlugin>> {
        self.plugins.read().await.values().cloned().collect()
    }

    /// Plugins that registered a capability, active or not
    pub async fn plugins_with_capability(&self, key: &str) -> Vec<Arc<IntegrationPlugin>> {
        self.plugins
            .read()
            .await
            .values()
            .filter(|p| p.has_capability(key))
            .cloned()
            .collect()
    }

    /// Plugins for which a capability is active
    pub async fn active_plugins(&self, key: &str) -> Vec<Arc<IntegrationPlugin>> {
        self.plugins
            .read()
            .await
            .values()
            .filter(|p| p.capability_active(key))
            .cloned()
            .collect()
    }

    /// URL mount points of all plugins exposing routes
    pub async fn url_mounts(&self) -> Vec<UrlMount> {
        self.plugins
            .read()
            .await
            .values()
            .filter_map(|p| p.urlpatterns())
            .collect()
    }

    /// Navigation links of all plugins
    pub async fn navigation_links(&self) -> Vec<PluginNavigationLink> {
        let plugins = self.plugins.read().await;

        plugins
            .values()
            .flat_map(|p| {
                p.navigation_links().iter().map(move |link| PluginNavigationLink {
                    plugin: p.plugin_name().to_string(),
                    link: link.clone(),
                })
            })
            .collect()
    }

    /// Namespaced settings of all plugins
    pub async fn settings_patterns(&self) -> BTreeMap<String, SettingDefinition> {
        self.plugins
            .read()
            .await
            .values()
            .filter_map(|p| p.settingspatterns())
            .flatten()
            .collect()
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventree_plugin::{MixinKind, UrlRoute, UrlsMixin};

    fn url_plugin(name: &str) -> IntegrationPlugin {
        let mut manifest = PluginManifest::new(name);
        manifest.mixins = vec!["urls".to_string()];
        manifest.urls = Some(vec![UrlRoute::new("^hi/", "hi")]);
        manifest.compose().unwrap()
    }

    #[tokio::test]
    async fn test_plugin_manager_creation() {
        let manager = PluginManager::new();
        assert!(manager.plugins().await.is_empty());
        assert!(manager.url_mounts().await.is_empty());
        assert!(manager.settings_patterns().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_and_query() {
        let manager = PluginManager::new();
        manager.register_plugin(url_plugin("Alpha")).await;
        manager
            .register_plugin(PluginManifest::new("Beta").compose().unwrap())
            .await;

        assert_eq!(manager.plugins().await.len(), 2);
        assert_eq!(manager.plugins_with_capability(UrlsMixin::KEY).await.len(), 1);
        assert_eq!(manager.active_plugins(UrlsMixin::KEY).await.len(), 1);
        assert_eq!(manager.active_plugins("base").await.len(), 2);

        let mounts = manager.url_mounts().await;
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].prefix, "^alpha/");
    }

    #[tokio::test]
    async fn test_register_replaces_by_name() {
        let manager = PluginManager::new();
        manager.register_plugin(url_plugin("Alpha")).await;
        manager
            .register_plugin(PluginManifest::new("Alpha").compose().unwrap())
            .await;

        let plugin = manager.get_plugin("Alpha").await.unwrap();
        assert!(!plugin.has_capability(MixinKind::Urls.key()));

        assert!(manager.unregister_plugin("Alpha").await.is_some());
        assert!(manager.get_plugin("Alpha").await.is_none());
    }
}
