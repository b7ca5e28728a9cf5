//! Navigation links mixin

use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{PluginError, PluginResult};
use crate::traits::{Capability, NavigationDeclaration, PluginDeclaration};

/// Fields every navigation link declaration must carry
const REQUIRED_FIELDS: [&str; 2] = ["link", "name"];

/// A validated navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    /// Label shown in the menu
    pub name: String,

    /// Link target
    pub link: String,

    /// Any further fields of the declaration (icon, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl NavigationLink {
    fn from_declaration(plugin: &str, entry: NavigationDeclaration) -> PluginResult<Self> {
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !entry.contains_key(**f)) {
            return Err(PluginError::InvalidNavigation {
                plugin: plugin.to_string(),
                entry: format!("{entry:?}"),
                missing: *missing,
            });
        }

        let mut extra = entry;
        let link = extra.remove("link").unwrap_or_default();
        let name = extra.remove("name").unwrap_or_default();
        Ok(Self { name, link, extra })
    }
}

/// Navigation links declared by a plugin.
///
/// Declarations are validated when the mixin is set up; a malformed link aborts
/// plugin composition instead of leaving the plugin without navigation.
#[derive(Debug, Clone)]
pub struct NavigationMixin {
    navigation: Option<Vec<NavigationLink>>,
}

impl NavigationMixin {
    pub const KEY: &'static str = "navigation";

    /// Read and validate the plugin's navigation declaration
    pub fn setup(declaration: &dyn PluginDeclaration) -> PluginResult<Self> {
        let plugin = declaration.plugin_name();
        let navigation = match declaration.navigation() {
            Some(entries) => Some(
                entries
                    .into_iter()
                    .map(|entry| NavigationLink::from_declaration(plugin, entry))
                    .collect::<PluginResult<Vec<_>>>()?,
            ),
            None => None,
        };

        debug!(
            "Plugin '{}' declares {} navigation links",
            plugin,
            navigation.as_ref().map(Vec::len).unwrap_or(0)
        );

        Ok(Self { navigation })
    }

    /// Does this plugin define navigation elements
    pub fn has_navigation(&self) -> bool {
        self.navigation.as_ref().is_some_and(|n| !n.is_empty())
    }

    pub fn links(&self) -> &[NavigationLink] {
        self.navigation.as_deref().unwrap_or_default()
    }
}

impl Capability for NavigationMixin {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn human_name(&self) -> &str {
        "Navigation Links"
    }

    fn is_active(&self) -> bool {
        self.has_navigation()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
