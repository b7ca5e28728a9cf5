//! Plugin manifests: declarative plugins loaded from YAML

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use inventree_plugin::{
    IntegrationPlugin, MixinKind, NavigationDeclaration, PluginDeclaration, PluginResult,
    SettingsDeclaration, UrlRoute,
};

/// Plugin manifest file structure (`plugin.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name
    pub name: String,

    /// Plugin version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Plugin description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plugin author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Mixins the plugin is composed with (`settings`, `urls`, `navigation`)
    #[serde(default)]
    pub mixins: Vec<String>,

    /// Custom settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsDeclaration>,

    /// URL routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<UrlRoute>>,

    /// Navigation links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavigationDeclaration>>,
}

impl PluginManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            author: None,
            mixins: Vec::new(),
            settings: None,
            urls: None,
            navigation: None,
        }
    }

    /// Snapshot an in-process declaration as a manifest
    pub fn from_declaration(declaration: &dyn PluginDeclaration, mixins: &[MixinKind]) -> Self {
        Self {
            mixins: mixins.iter().map(|kind| kind.key().to_string()).collect(),
            settings: declaration.settings(),
            urls: declaration.urls(),
            navigation: declaration.navigation(),
            ..Self::new(declaration.plugin_name())
        }
    }

    /// Load a manifest from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: PluginManifest = serde_yaml::from_str(content)?;
        if manifest.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Plugin manifest has an empty name"));
        }
        Ok(manifest)
    }

    /// Save the manifest to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Parsed mixin list
    pub fn mixin_kinds(&self) -> PluginResult<Vec<MixinKind>> {
        self.mixins.iter().map(|m| m.parse()).collect()
    }

    /// Whether the manifest composes the given mixin
    pub fn uses_mixin(&self, kind: MixinKind) -> bool {
        self.mixin_kinds()
            .map(|kinds| kinds.contains(&kind))
            .unwrap_or(false)
    }

    /// Compose the plugin this manifest describes
    pub fn compose(&self) -> PluginResult<IntegrationPlugin> {
        let kinds = self.mixin_kinds()?;

        let declared = [
            (MixinKind::Settings, self.settings.is_some()),
            (MixinKind::Urls, self.urls.is_some()),
            (MixinKind::Navigation, self.navigation.is_some()),
        ];
        for (kind, present) in declared {
            if present && !kinds.contains(&kind) {
                warn!(
                    "Plugin '{}' declares {} but does not use the {} mixin; ignoring",
                    self.name, kind, kind
                );
            }
        }

        IntegrationPlugin::compose(self, &kinds)
    }
}

impl PluginDeclaration for PluginManifest {
    fn plugin_name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> Option<SettingsDeclaration> {
        self.settings.clone()
    }

    fn urls(&self) -> Option<Vec<UrlRoute>> {
        self.urls.clone()
    }

    fn navigation(&self) -> Option<Vec<NavigationDeclaration>> {
        self.navigation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventree_plugin::PluginError;

    const SAMPLE: &str = r#"
name: Sample
version: "0.1.0"
description: Sample integration plugin
mixins: [settings, urls, navigation]
settings:
  API_KEY:
    name: API Key
    description: Key for the supplier API
    validator: string
urls:
  - pattern: "^hi/"
    view: hi
    name: hi
navigation:
  - name: Sample
    link: "plugin:sample:hi"
    icon: fa-box
"#;

    #[test]
    fn test_parse_and_compose() {
        let manifest = PluginManifest::parse(SAMPLE).unwrap();
        assert_eq!(manifest.version.as_deref(), Some("0.1.0"));

        let plugin = manifest.compose().unwrap();
        assert!(plugin.has_settings());
        assert!(plugin.has_urls());
        assert!(plugin.has_navigation());
        assert_eq!(plugin.navigation_links()[0].extra["icon"], "fa-box");
        assert!(plugin
            .settingspatterns()
            .unwrap()
            .contains_key("PLUGIN_SAMPLE_API_KEY"));
    }

    #[test]
    fn test_unknown_mixin() {
        let mut manifest = PluginManifest::new("Sample");
        manifest.mixins.push("labels".to_string());

        assert_eq!(
            manifest.compose().unwrap_err(),
            PluginError::UnknownMixin("labels".to_string())
        );
        assert!(!manifest.uses_mixin(MixinKind::Settings));
    }

    #[test]
    fn test_invalid_navigation_manifest() {
        let yaml = r#"
name: Broken
mixins: [navigation]
navigation:
  - link: "/x"
"#;
        let manifest = PluginManifest::parse(yaml).unwrap();
        assert!(matches!(
            manifest.compose(),
            Err(PluginError::InvalidNavigation { missing: "name", .. })
        ));
    }

    #[test]
    fn test_from_declaration() {
        let declared = PluginManifest::parse(SAMPLE).unwrap();
        let manifest =
            PluginManifest::from_declaration(&declared, &[MixinKind::Settings, MixinKind::Urls]);

        assert_eq!(manifest.name, "Sample");
        assert_eq!(manifest.mixins, vec!["settings", "urls"]);
        assert!(manifest.version.is_none());
        assert_eq!(manifest.settings, declared.settings);
        assert!(manifest.navigation.is_some());
        assert!(!manifest.uses_mixin(MixinKind::Navigation));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(PluginManifest::parse("name: \"\"").is_err());
        assert!(PluginManifest::parse("mixins: []").is_err());
    }
}
