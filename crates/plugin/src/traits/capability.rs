//! Capability trait and manifest records

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use crate::registry::CapabilityRegistry;

/// One optional unit of plugin behaviour (settings, URL routes, navigation links).
///
/// Each capability decides its own activation through [`Capability::is_active`];
/// the registry never needs to know which concrete capability it holds.
pub trait Capability: Any + Send + Sync + fmt::Debug {
    /// Short identifier, unique per plugin instance
    fn key(&self) -> &str;

    /// Display name shown in capability manifests
    fn human_name(&self) -> &str {
        self.key()
    }

    /// Whether the capability is in effect for its plugin
    fn is_active(&self) -> bool;

    /// Access to the concrete type for typed lookups
    fn as_any(&self) -> &dyn Any;

    /// Manifest row for this capability
    fn record(&self) -> CapabilityRecord {
        CapabilityRecord::new(self.key(), self.human_name())
    }

    /// Register this capability into a plugin's registry
    fn register(self: Box<Self>, into: &mut CapabilityRegistry)
    where
        Self: Sized,
    {
        into.register(self);
    }
}

/// A registered capability as reported in a plugin's manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// Capability key
    pub key: String,

    /// Human readable capability name
    pub human_name: String,
}

impl CapabilityRecord {
    pub fn new(key: impl Into<String>, human_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            human_name: human_name.into(),
        }
    }
}

impl fmt::Display for CapabilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.human_name, self.key)
    }
}

/// Capability whose activation is a fixed boolean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCapability {
    key: String,
    human_name: Option<String>,
    active: bool,
}

impl StaticCapability {
    pub fn new(key: impl Into<String>, active: bool) -> Self {
        Self {
            key: key.into(),
            human_name: None,
            active,
        }
    }

    /// Override the display name, which otherwise defaults to the key
    pub fn with_human_name(mut self, human_name: impl Into<String>) -> Self {
        self.human_name = Some(human_name.into());
        self
    }
}

impl Capability for StaticCapability {
    fn key(&self) -> &str {
        &self.key
    }

    fn human_name(&self) -> &str {
        self.human_name.as_deref().unwrap_or(&self.key)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
