//! Per-plugin capability registry

use tracing::debug;

use crate::traits::{Capability, CapabilityRecord};

/// Key of the structural capability every plugin registers
pub const BASE_CAPABILITY: &str = "base";

/// Capabilities registered on one plugin instance.
///
/// Keys are unique: registering a key again replaces the earlier capability in
/// place. The registry lives and dies with its plugin and is never shared.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    capabilities: Vec<Box<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability, overwriting any earlier one with the same key
    pub fn register(&mut self, capability: Box<dyn Capability>) {
        debug!(
            "Registering capability '{}' ({})",
            capability.key(),
            capability.human_name()
        );

        let existing = self
            .capabilities
            .iter()
            .position(|c| c.key() == capability.key());

        match existing {
            Some(index) => self.capabilities[index] = capability,
            None => self.capabilities.push(capability),
        }
    }

    /// Whether `key` was registered, regardless of activation
    pub fn has_capability(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Whether `key` was registered and is currently active
    pub fn capability_active(&self, key: &str) -> bool {
        self.find(key).map(|c| c.is_active()).unwrap_or(false)
    }

    /// Manifest of registered capabilities in registration order.
    /// The `base` capability is only listed when `include_base` is set.
    pub fn list_capabilities(&self, include_base: bool) -> Vec<CapabilityRecord> {
        self.capabilities
            .iter()
            .filter(|c| include_base || c.key() != BASE_CAPABILITY)
            .map(|c| c.record())
            .collect()
    }

    /// Typed access to a registered capability
    pub fn get<T: Capability>(&self, key: &str) -> Option<&T> {
        self.find(key)?.as_any().downcast_ref::<T>()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    fn find(&self, key: &str) -> Option<&dyn Capability> {
        self.capabilities
            .iter()
            .find(|c| c.key() == key)
            .map(|c| &**c)
    }
}
