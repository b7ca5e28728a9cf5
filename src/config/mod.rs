//! Configuration management for the plugin host

pub mod config;
pub mod plugins;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::Config;
pub use plugins::PluginConfig;
