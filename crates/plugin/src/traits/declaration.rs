//! Static declarations a concrete plugin provides

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Setting key -> setting definition, as declared by a plugin
pub type SettingsDeclaration = BTreeMap<String, SettingDefinition>;

/// A single navigation link declaration; must contain `link` and `name`
pub type NavigationDeclaration = BTreeMap<String, String>;

/// Declaration surface of a plugin.
///
/// Everything except the name is optional. Declarations are read once, when the
/// plugin is composed, and never change for the lifetime of the instance.
pub trait PluginDeclaration: Send + Sync {
    /// Plugin name used to namespace settings keys, URL mounts and identifiers
    fn plugin_name(&self) -> &str;

    /// Custom settings for this plugin
    fn settings(&self) -> Option<SettingsDeclaration> {
        None
    }

    /// URL routes exposed under the plugin's mount point
    fn urls(&self) -> Option<Vec<UrlRoute>> {
        None
    }

    /// Navigation links added to the host's menu
    fn navigation(&self) -> Option<Vec<NavigationDeclaration>> {
        None
    }
}

/// Definition of a plugin setting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingDefinition {
    /// Display name
    pub name: String,

    /// Help text
    #[serde(default)]
    pub description: String,

    /// Value used until one is stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Value type check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<SettingValidator>,
}

impl SettingDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default: serde_yaml::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_validator(mut self, validator: SettingValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Check a candidate value against the validator and choices
    pub fn check(&self, value: &serde_yaml::Value) -> std::result::Result<(), String> {
        if let Some(validator) = &self.validator {
            if !validator.accepts(value) {
                return Err(format!("expected a {} value", validator.type_name()));
            }
        }

        if let Some(choices) = &self.choices {
            let allowed = value
                .as_str()
                .map(|v| choices.iter().any(|c| c == v))
                .unwrap_or(false);
            if !allowed {
                return Err(format!("must be one of: {}", choices.join(", ")));
            }
        }

        Ok(())
    }
}

/// Value type enforced for a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValidator {
    Bool,
    Integer,
    String,
}

impl SettingValidator {
    pub fn accepts(&self, value: &serde_yaml::Value) -> bool {
        match self {
            SettingValidator::Bool => value.is_bool(),
            SettingValidator::Integer => value.is_i64() || value.is_u64(),
            SettingValidator::String => value.is_string(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValidator::Bool => "boolean",
            SettingValidator::Integer => "integer",
            SettingValidator::String => "string",
        }
    }
}

/// A route declared by a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRoute {
    /// Route pattern relative to the plugin mount point (e.g. `^hi/`)
    pub pattern: String,

    /// View handling the route
    pub view: String,

    /// Optional route name used for reverse lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UrlRoute {
    pub fn new(pattern: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            view: view.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
