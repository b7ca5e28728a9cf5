//! Errors raised while composing plugins and resolving their settings

use thiserror::Error;

/// Result type for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Errors that can occur while composing a plugin or using its capabilities
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    /// A navigation link declaration is missing a required field.
    /// Composition of the plugin is aborted.
    #[error("Wrong link definition in plugin '{plugin}': missing '{missing}' in {entry}")]
    InvalidNavigation {
        plugin: String,
        entry: String,
        missing: &'static str,
    },

    /// A mixin name that does not map to any known capability
    #[error("Unknown mixin: {0}")]
    UnknownMixin(String),

    /// A setting key that was never defined in the settings store
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// A value rejected by the setting's declared validator or choices
    #[error("Invalid value for setting {key}: {reason}")]
    InvalidSettingValue { key: String, reason: String },

    /// The settings store could not be accessed
    #[error("Settings store error: {0}")]
    Store(String),
}
