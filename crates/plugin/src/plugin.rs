//! Integration plugins composed from mixins

use std::collections::BTreeMap;
use tracing::info;

use crate::error::PluginResult;
use crate::mixins::{
    BaseCapability, MixinKind, NavigationLink, NavigationMixin, SettingsMixin, UrlMount,
    UrlsMixin,
};
use crate::registry::CapabilityRegistry;
use crate::traits::{Capability, CapabilityRecord, PluginDeclaration, SettingDefinition};

/// URL-safe identifier derived from a plugin name
pub fn plugin_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(char::is_whitespace, "-")
}

/// A plugin instance together with the capabilities it was composed with.
///
/// The `base` capability is registered first, followed by each requested
/// mixin in order. Mixin state is derived from the declaration once, at
/// composition, and does not change afterwards.
#[derive(Debug)]
pub struct IntegrationPlugin {
    name: String,
    slug: String,
    mixins: Vec<MixinKind>,
    registry: CapabilityRegistry,
}

impl IntegrationPlugin {
    /// A plugin with no optional capabilities
    pub fn new(declaration: &dyn PluginDeclaration) -> Self {
        let mut registry = CapabilityRegistry::new();
        Box::new(BaseCapability).register(&mut registry);

        Self {
            name: declaration.plugin_name().to_string(),
            slug: plugin_slug(declaration.plugin_name()),
            mixins: Vec::new(),
            registry,
        }
    }

    /// Compose a plugin from its declaration and the mixins it uses.
    ///
    /// Fails if a mixin rejects the declaration (malformed navigation links).
    pub fn compose(
        declaration: &dyn PluginDeclaration,
        mixins: &[MixinKind],
    ) -> PluginResult<Self> {
        let mut plugin = Self::new(declaration);

        for mixin in mixins {
            match mixin {
                MixinKind::Settings => {
                    Box::new(SettingsMixin::setup(declaration)).register(&mut plugin.registry)
                }
                MixinKind::Urls => {
                    Box::new(UrlsMixin::setup(declaration)).register(&mut plugin.registry)
                }
                MixinKind::Navigation => {
                    Box::new(NavigationMixin::setup(declaration)?).register(&mut plugin.registry)
                }
            }

            if !plugin.mixins.contains(mixin) {
                plugin.mixins.push(*mixin);
            }
        }

        info!(
            "Composed plugin '{}' with mixins [{}]",
            plugin.name,
            plugin
                .mixins
                .iter()
                .map(|m| m.key())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(plugin)
    }

    pub fn plugin_name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Mixins the plugin was composed with, in composition order
    pub fn mixins(&self) -> &[MixinKind] {
        &self.mixins
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Register an additional capability; an existing key is overwritten
    pub fn register_capability(&mut self, capability: Box<dyn Capability>) {
        self.registry.register(capability);
    }

    pub fn has_capability(&self, key: &str) -> bool {
        self.registry.has_capability(key)
    }

    pub fn capability_active(&self, key: &str) -> bool {
        self.registry.capability_active(key)
    }

    pub fn list_capabilities(&self, include_base: bool) -> Vec<CapabilityRecord> {
        self.registry.list_capabilities(include_base)
    }

    pub fn settings_mixin(&self) -> Option<&SettingsMixin> {
        self.registry.get(SettingsMixin::KEY)
    }

    pub fn urls_mixin(&self) -> Option<&UrlsMixin> {
        self.registry.get(UrlsMixin::KEY)
    }

    pub fn navigation_mixin(&self) -> Option<&NavigationMixin> {
        self.registry.get(NavigationMixin::KEY)
    }

    pub fn has_settings(&self) -> bool {
        self.settings_mixin().is_some_and(SettingsMixin::has_settings)
    }

    pub fn settingspatterns(&self) -> Option<BTreeMap<String, SettingDefinition>> {
        self.settings_mixin()?.settingspatterns()
    }

    pub fn has_urls(&self) -> bool {
        self.urls_mixin().is_some_and(UrlsMixin::has_urls)
    }

    pub fn urlpatterns(&self) -> Option<UrlMount> {
        self.urls_mixin()?.urlpatterns()
    }

    /// Base URL of the plugin, if it composes the URLs mixin
    pub fn base_url(&self, plugin_url: &str) -> Option<String> {
        self.urls_mixin().map(|m| m.base_url(plugin_url))
    }

    pub fn has_navigation(&self) -> bool {
        self.navigation_mixin()
            .is_some_and(NavigationMixin::has_navigation)
    }

    pub fn navigation_links(&self) -> &[NavigationLink] {
        self.navigation_mixin()
            .map(NavigationMixin::links)
            .unwrap_or_default()
    }
}
