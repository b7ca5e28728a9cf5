//! Configuration tests

use super::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(parsed.plugin_url, "plugin");
}

#[test]
fn test_config_from_file() {
    let mut config = Config::default();
    config.plugins.plugin_directories = vec![PathBuf::from("./my-plugins")];
    config.settings.insert(
        "PLUGIN_SAMPLE_API_KEY".to_string(),
        serde_yaml::Value::String("secret".to_string()),
    );

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(config.version, loaded.version);
    assert_eq!(loaded.plugins.plugin_directories, config.plugins.plugin_directories);
    assert_eq!(loaded.settings.len(), 1);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("version: \"1.0\"\n").unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.plugin_url(), "plugin");
    assert!(config.plugins.enable_external_discovery);
    assert!(config.settings.is_empty());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.version = "2.0".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.plugin_url = "//".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config
        .settings
        .insert("INVENTREE_DEFAULT_CURRENCY".to_string(), "USD".into());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.plugins.disabled.push("  ".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_plugin_url_trimmed() {
    let mut config = Config::default();
    config.plugin_url = "/plugin/".to_string();
    assert_eq!(config.plugin_url(), "plugin");
}

#[test]
fn test_disabled_plugins_case_insensitive() {
    let mut config = PluginConfig::default();
    config.disabled.push("Sample".to_string());
    assert!(config.is_disabled("sample"));
    assert!(!config.is_disabled("other"));
}

#[test]
fn test_set_disabled() {
    let mut config = PluginConfig::default();
    config.set_disabled("Sample", true);
    config.set_disabled("SAMPLE", true);
    assert_eq!(config.disabled, vec!["Sample".to_string()]);

    config.set_disabled("sample", false);
    assert!(config.disabled.is_empty());
}
