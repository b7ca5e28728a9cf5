//! URL routes mixin

use serde::Serialize;
use std::any::Any;

use crate::plugin::plugin_slug;
use crate::traits::{Capability, PluginDeclaration, UrlRoute};

/// Mount point of a plugin's routes in the host URL configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMount {
    /// Mount pattern, `^<slug>/`
    pub prefix: String,

    /// Name of the mount
    pub name: String,

    /// Namespace for reverse lookups of the sub-routes
    pub namespace: String,

    /// Declared sub-routes
    pub routes: Vec<UrlRoute>,
}

impl UrlMount {
    /// Sub-route patterns joined onto the mount prefix
    pub fn full_patterns(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|route| {
                format!(
                    "{}{}",
                    self.prefix,
                    route.pattern.trim_start_matches('^')
                )
            })
            .collect()
    }

    /// Qualified name of a sub-route, `<namespace>:<route>`
    pub fn qualified_name(&self, route: &str) -> Option<String> {
        self.routes
            .iter()
            .any(|r| r.name.as_deref() == Some(route))
            .then(|| format!("{}:{}", self.namespace, route))
    }
}

/// URL routes declared by a plugin
#[derive(Debug, Clone)]
pub struct UrlsMixin {
    slug: String,
    urls: Option<Vec<UrlRoute>>,
}

impl UrlsMixin {
    pub const KEY: &'static str = "urls";

    /// Read the plugin's URL declaration
    pub fn setup(declaration: &dyn PluginDeclaration) -> Self {
        Self {
            slug: plugin_slug(declaration.plugin_name()),
            urls: declaration.urls(),
        }
    }

    pub fn urls(&self) -> &[UrlRoute] {
        self.urls.as_deref().unwrap_or_default()
    }

    /// Does this plugin use custom urls
    pub fn has_urls(&self) -> bool {
        self.urls.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// Base URL of the plugin below the host's plugin prefix
    pub fn base_url(&self, plugin_url: &str) -> String {
        format!("{}/{}/", plugin_url.trim_end_matches('/'), self.slug)
    }

    /// Mount point for the declared routes; `None` when no routes are declared
    pub fn urlpatterns(&self) -> Option<UrlMount> {
        if !self.has_urls() {
            return None;
        }

        Some(UrlMount {
            prefix: format!("^{}/", self.slug),
            name: self.slug.clone(),
            namespace: self.slug.clone(),
            routes: self.urls().to_vec(),
        })
    }
}

impl Capability for UrlsMixin {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn human_name(&self) -> &str {
        "URLs"
    }

    fn is_active(&self) -> bool {
        self.has_urls()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
