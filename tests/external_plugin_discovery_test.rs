use inventree_plugin::PluginLifecycleManager;
use inventree_plugins::{Config, InvenTreePlugins, RegistryPluginStatus};
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, plugin: &str, content: &str) {
    let plugin_dir = dir.join(plugin);
    std::fs::create_dir_all(&plugin_dir).unwrap();
    std::fs::write(plugin_dir.join("plugin.yaml"), content).unwrap();
}

const SUPPLIER_PLUGIN: &str = r#"
name: Supplier Sync
version: "1.0.0"
description: "Synchronises supplier parts"
mixins: [settings, urls, navigation]
settings:
  API_KEY:
    name: API Key
    description: Key for the supplier API
    validator: string
  POLL_INTERVAL:
    name: Poll interval
    default: 60
    validator: integer
urls:
  - pattern: "^sync/"
    view: sync
    name: sync
navigation:
  - name: Supplier Sync
    link: "plugin:supplier-sync:sync"
    icon: fa-sync
"#;

const BAD_NAVIGATION_PLUGIN: &str = r#"
name: Broken Links
mixins: [navigation]
navigation:
  - name: Broken
"#;

#[tokio::test]
async fn test_external_plugin_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let plugin_dir = temp_dir.path().join("plugins");
    write_manifest(&plugin_dir, "supplier", SUPPLIER_PLUGIN);
    write_manifest(&plugin_dir, "broken", BAD_NAVIGATION_PLUGIN);
    write_manifest(&plugin_dir, "garbage", "name: [unterminated");

    let mut config = Config::default();
    config.plugins.plugin_directories = vec![plugin_dir];
    config.settings.insert(
        "PLUGIN_SUPPLIER SYNC_API_KEY".to_string(),
        serde_yaml::Value::String("secret".to_string()),
    );

    let app = InvenTreePlugins::new(config).unwrap();
    app.initialize_plugins()
        .await
        .expect("Plugin initialization should succeed");

    let plugins = app.get_plugin_info().await.unwrap();
    assert_eq!(plugins.len(), 2, "Unparseable manifest should be skipped");

    let supplier = plugins.iter().find(|p| p.name == "Supplier Sync").unwrap();
    assert_eq!(supplier.status, "loaded");
    let keys: Vec<&str> = supplier.capabilities.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["settings", "urls", "navigation"]);

    let broken = plugins.iter().find(|p| p.name == "Broken Links").unwrap();
    assert_eq!(broken.status, "error");
    assert!(broken.capabilities.is_empty());
    assert!(app.plugin_manager().get_plugin("Broken Links").await.is_none());

    let settings = app.settings_overview().await;
    let api_key = settings
        .iter()
        .find(|s| s.key == "PLUGIN_SUPPLIER SYNC_API_KEY")
        .unwrap();
    assert_eq!(
        api_key.value,
        Some(serde_yaml::Value::String("secret".to_string()))
    );
    let interval = settings
        .iter()
        .find(|s| s.key == "PLUGIN_SUPPLIER SYNC_POLL_INTERVAL")
        .unwrap();
    assert_eq!(interval.value, Some(serde_yaml::Value::Number(60u64.into())));

    let mounts = app.url_mounts().await;
    let mount = mounts.get("plugin/supplier-sync/").unwrap();
    assert_eq!(mount.prefix, "^supplier-sync/");
    assert_eq!(mount.namespace, "supplier-sync");

    let links = app.navigation_links().await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].plugin, "Supplier Sync");
    assert_eq!(links[0].link.extra["icon"], "fa-sync");
}

#[tokio::test]
async fn test_disabled_plugin_is_discovered_but_not_loaded() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), "supplier", SUPPLIER_PLUGIN);

    let mut config = Config::default();
    config.plugins.plugin_directories = vec![temp_dir.path().to_path_buf()];
    config.plugins.disabled = vec!["supplier sync".to_string()];
    config.settings.insert(
        "PLUGIN_SUPPLIER SYNC_API_KEY".to_string(),
        serde_yaml::Value::String("secret".to_string()),
    );

    let app = InvenTreePlugins::new(config).unwrap();
    app.initialize_plugins().await.unwrap();

    let entry = app.registry().get_plugin("Supplier Sync").await.unwrap();
    assert_eq!(entry.status, RegistryPluginStatus::Disabled);
    assert!(app.url_mounts().await.is_empty());
    assert!(app.settings().get("PLUGIN_SUPPLIER SYNC_API_KEY").is_none());

    app.enable_plugin("Supplier Sync").await.unwrap();
    assert_eq!(app.url_mounts().await.len(), 1);
    assert_eq!(
        app.settings().get("PLUGIN_SUPPLIER SYNC_API_KEY"),
        Some(serde_yaml::Value::String("secret".to_string()))
    );
}

#[tokio::test]
async fn test_reload_keeps_plugin_disabled_at_runtime() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), "supplier", SUPPLIER_PLUGIN);

    let mut config = Config::default();
    config.plugins.plugin_directories = vec![temp_dir.path().to_path_buf()];

    let app = InvenTreePlugins::new(config).unwrap();
    app.initialize_plugins().await.unwrap();
    app.disable_plugin("Supplier Sync").await.unwrap();

    app.registry().reload_plugins().await.unwrap();

    let entry = app.registry().get_plugin("Supplier Sync").await.unwrap();
    assert_eq!(entry.status, RegistryPluginStatus::Disabled);
    assert!(app.url_mounts().await.is_empty());
}

#[tokio::test]
async fn test_discovery_can_be_turned_off() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), "supplier", SUPPLIER_PLUGIN);

    let mut config = Config::default();
    config.plugins.plugin_directories = vec![temp_dir.path().to_path_buf()];
    config.plugins.enable_external_discovery = false;

    let app = InvenTreePlugins::new(config).unwrap();
    app.initialize_plugins().await.unwrap();

    assert!(app.get_plugin_info().await.unwrap().is_empty());
}
