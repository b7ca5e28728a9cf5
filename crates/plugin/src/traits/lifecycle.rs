//! Plugin lifecycle management traits

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::capability::CapabilityRecord;

/// Plugin lifecycle manager trait
#[async_trait]
pub trait PluginLifecycleManager: Send + Sync {
    /// Discover and load plugins
    async fn initialize_plugins(&self) -> Result<()>;

    /// Drop loaded plugins and load them again from their declarations
    async fn reload_plugins(&self) -> Result<()>;

    /// Get plugin status
    async fn get_plugin_status(&self) -> Result<Vec<PluginStatus>>;
}

/// Plugin status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginStatus {
    /// Plugin name
    pub name: String,

    /// Plugin status
    pub status: String,

    /// Registered capabilities, without `base`
    pub capabilities: Vec<CapabilityRecord>,

    /// Last activity
    pub last_activity: Option<chrono::DateTime<chrono::Utc>>,

    /// Error message (if any)
    pub error: Option<String>,
}
