//! Optional capabilities a plugin can compose

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

use crate::error::PluginError;
use crate::registry::BASE_CAPABILITY;
use crate::traits::Capability;

pub mod navigation;
pub mod settings;
pub mod urls;

pub use navigation::{NavigationLink, NavigationMixin};
pub use settings::SettingsMixin;
pub use urls::{UrlMount, UrlsMixin};

/// Mixins a plugin can be composed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixinKind {
    /// Custom settings
    Settings,

    /// URL routes
    Urls,

    /// Navigation links
    Navigation,
}

impl MixinKind {
    /// Capability key the mixin registers under
    pub fn key(&self) -> &'static str {
        match self {
            MixinKind::Settings => SettingsMixin::KEY,
            MixinKind::Urls => UrlsMixin::KEY,
            MixinKind::Navigation => NavigationMixin::KEY,
        }
    }

    pub fn all() -> [MixinKind; 3] {
        [MixinKind::Settings, MixinKind::Urls, MixinKind::Navigation]
    }
}

impl fmt::Display for MixinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MixinKind {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "settings" => Ok(MixinKind::Settings),
            "urls" => Ok(MixinKind::Urls),
            "navigation" => Ok(MixinKind::Navigation),
            _ => Err(PluginError::UnknownMixin(s.to_string())),
        }
    }
}

/// Marks an object as a recognised plugin. Always active.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseCapability;

impl Capability for BaseCapability {
    fn key(&self) -> &str {
        BASE_CAPABILITY
    }

    fn is_active(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixin_kind_from_str() {
        assert_eq!("settings".parse::<MixinKind>().unwrap(), MixinKind::Settings);
        assert_eq!(" URLs ".parse::<MixinKind>().unwrap(), MixinKind::Urls);
        assert_eq!(
            "Navigation".parse::<MixinKind>().unwrap(),
            MixinKind::Navigation
        );
        assert_eq!(
            "barcode".parse::<MixinKind>(),
            Err(PluginError::UnknownMixin("barcode".to_string()))
        );
    }

    #[test]
    fn test_mixin_keys() {
        let keys: Vec<_> = MixinKind::all().iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["settings", "urls", "navigation"]);
    }
}
