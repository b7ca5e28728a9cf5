//! Capability registry for InvenTree integration plugins
//!
//! An integration plugin is a [`PluginDeclaration`] (its name plus optional
//! static settings, URL and navigation declarations) composed with an explicit
//! list of mixins. Every composed mixin registers itself as a [`Capability`]
//! in the plugin's own [`CapabilityRegistry`], which the host then queries to
//! decide what to wire up for that plugin.

pub mod error;
pub mod mixins;
pub mod plugin;
pub mod registry;
pub mod traits;

pub use error::{PluginError, PluginResult};
pub use mixins::{
    BaseCapability, MixinKind, NavigationLink, NavigationMixin, SettingsMixin, UrlMount,
    UrlsMixin,
};
pub use plugin::{plugin_slug, IntegrationPlugin};
pub use registry::{CapabilityRegistry, BASE_CAPABILITY};
pub use traits::*;
