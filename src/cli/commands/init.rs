//! Init command implementation

use crate::{utils, Config, PluginManifest};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use inventree_plugin::{SettingDefinition, SettingValidator, UrlRoute};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory the example configuration points at
const EXAMPLE_PLUGIN_DIR: &str = "./plugins";

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".inventree-plugins.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Create example configuration and a sample plugin")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = PathBuf::from(
        matches
            .get_one::<String>("output")
            .ok_or_else(|| anyhow!("Missing output path"))?,
    );
    let example = matches.get_flag("example");

    info!("Initializing configuration file: {:?}", output_path);

    let config = if example {
        create_example_config()
    } else {
        Config::default()
    };

    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        let base = output_path.parent().unwrap_or_else(|| Path::new("."));
        let manifest_path = write_example_plugin(base)?;
        println!("Example configuration created.");
        println!("Sample plugin manifest written to {:?}", manifest_path);
    } else {
        println!("Default configuration file created.");
        println!("Add plugin directories and settings to get started.");
    }

    Ok(())
}

fn create_example_config() -> Config {
    let mut config = Config::default();
    config.plugins.plugin_directories = vec![PathBuf::from(EXAMPLE_PLUGIN_DIR)];
    config.settings.insert(
        "PLUGIN_SAMPLE_SUPPLIER_NAME".to_string(),
        serde_yaml::Value::String("ACME Components".to_string()),
    );
    config
}

/// Sample plugin composed with every mixin
pub fn example_manifest() -> PluginManifest {
    let mut manifest = PluginManifest::new("Sample");
    manifest.version = Some("0.1.0".to_string());
    manifest.description = Some("Sample integration plugin".to_string());
    manifest.mixins = vec![
        "settings".to_string(),
        "urls".to_string(),
        "navigation".to_string(),
    ];

    let mut settings = BTreeMap::new();
    settings.insert(
        "SUPPLIER_NAME".to_string(),
        SettingDefinition::new("Supplier name")
            .with_description("Name shown on imported orders")
            .with_validator(SettingValidator::String),
    );
    settings.insert(
        "SYNC_ENABLED".to_string(),
        SettingDefinition::new("Enable sync")
            .with_default(serde_yaml::Value::Bool(false))
            .with_validator(SettingValidator::Bool),
    );
    manifest.settings = Some(settings);

    manifest.urls = Some(vec![UrlRoute::new("^hi/", "hi").named("hi")]);

    let mut link = BTreeMap::new();
    link.insert("name".to_string(), "Sample".to_string());
    link.insert("link".to_string(), "plugin:sample:hi".to_string());
    link.insert("icon".to_string(), "fa-box".to_string());
    manifest.navigation = Some(vec![link]);

    manifest
}

fn write_example_plugin(base: &Path) -> Result<PathBuf> {
    let manifest = example_manifest();
    let plugin_dir = base
        .join(EXAMPLE_PLUGIN_DIR)
        .join(utils::sanitize_dirname(&manifest.name));
    utils::ensure_directory(&plugin_dir)?;

    let manifest_path = plugin_dir.join("plugin.yaml");
    manifest.save_to_file(&manifest_path)?;
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_manifest_composes() {
        let plugin = example_manifest().compose().unwrap();
        assert!(plugin.has_settings());
        assert!(plugin.has_urls());
        assert_eq!(plugin.navigation_links().len(), 1);
    }

    #[test]
    fn test_example_config_is_valid() {
        create_example_config().validate().unwrap();
    }
}
