//! Plugin management CLI commands

use crate::cli::utils;
use crate::Config;
use anyhow::Result;
use clap::ArgMatches;

pub struct ListArgs {
    /// Show detailed information
    detailed: bool,

    /// Filter by capability key
    capability: Option<String>,
}

/// Create the plugins command
pub fn command() -> clap::Command {
    clap::Command::new("plugins")
        .about("Manage plugins")
        .subcommand_negates_reqs(true)
        .subcommand(
            clap::Command::new("list")
                .about("List discovered plugins")
                .arg(utils::config_arg())
                .arg(
                    clap::Arg::new("detailed")
                        .short('d')
                        .long("detailed")
                        .help("Show detailed information")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(clap::arg!(--capability <CAPABILITY> "Filter by capability key")),
        )
        .subcommand(
            clap::Command::new("info")
                .about("Show plugin information")
                .arg(utils::config_arg())
                .arg(clap::arg!(<NAME> "Plugin name")),
        )
        .subcommand(
            clap::Command::new("enable")
                .about("Enable a plugin")
                .arg(utils::config_arg())
                .arg(clap::arg!(<NAME> "Plugin name")),
        )
        .subcommand(
            clap::Command::new("disable")
                .about("Disable a plugin")
                .arg(utils::config_arg())
                .arg(clap::arg!(<NAME> "Plugin name")),
        )
}

/// Run plugin command
pub async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", sub_matches)) => {
            let args = ListArgs {
                detailed: sub_matches.get_flag("detailed"),
                capability: sub_matches.get_one::<String>("capability").cloned(),
            };
            run_list(sub_matches, args).await
        }
        Some(("info", sub_matches)) => {
            let name = utils::required(sub_matches, "NAME")?;
            run_info(sub_matches, name).await
        }
        Some(("enable", sub_matches)) => {
            let name = utils::required(sub_matches, "NAME")?;
            run_toggle(sub_matches, name, true).await
        }
        Some(("disable", sub_matches)) => {
            let name = utils::required(sub_matches, "NAME")?;
            run_toggle(sub_matches, name, false).await
        }
        _ => {
            let _ = command().print_help();
            Ok(())
        }
    }
}

async fn run_list(matches: &ArgMatches, args: ListArgs) -> Result<()> {
    let app = utils::create_app(matches).await?;
    let mut plugins = app.get_plugin_info().await?;

    if let Some(capability) = &args.capability {
        plugins.retain(|plugin| {
            plugin
                .capabilities
                .iter()
                .any(|cap| cap.key.eq_ignore_ascii_case(capability))
        });
    }

    if plugins.is_empty() {
        println!("No plugins found.");
        return Ok(());
    }

    println!("Discovered plugins:");
    println!();

    for plugin in plugins {
        println!("  {} [{}]", plugin.name, plugin.status);

        if args.detailed {
            if plugin.capabilities.is_empty() {
                println!("    Capabilities: none");
            } else {
                println!("    Capabilities:");
                for capability in &plugin.capabilities {
                    println!("      - {}", capability);
                }
            }
            if let Some(loaded) = plugin.last_activity {
                println!("    Loaded: {}", loaded.to_rfc3339());
            }
            if let Some(error) = &plugin.error {
                println!("    Error: {}", error);
            }
        }

        println!();
    }

    Ok(())
}

async fn run_info(matches: &ArgMatches, name: &str) -> Result<()> {
    let app = utils::create_app(matches).await?;

    let Some(entry) = app.registry().get_plugin(name).await else {
        println!("Plugin '{}' not found.", name);
        return Ok(());
    };

    let manifest = &entry.manifest;
    println!("Plugin Information:");
    println!("  Name: {}", manifest.name);
    if let Some(version) = &manifest.version {
        println!("  Version: {}", version);
    }
    if let Some(description) = &manifest.description {
        println!("  Description: {}", description);
    }
    if let Some(author) = &manifest.author {
        println!("  Author: {}", author);
    }
    if let Some(path) = &entry.manifest_path {
        println!("  Manifest: {}", path.display());
    }
    println!("  Status: {}", entry.status);
    if let crate::RegistryPluginStatus::Error(message) = &entry.status {
        println!("  Error: {}", message);
    }
    println!("  Mixins: {}", manifest.mixins.join(", "));

    if let Some(plugin) = app.plugin_manager().get_plugin(name).await {
        println!("  Slug: {}", plugin.slug());
        println!("  Capabilities:");
        for capability in plugin.list_capabilities(true) {
            let state = if plugin.capability_active(&capability.key) {
                "active"
            } else {
                "inactive"
            };
            println!("    - {} ({})", capability, state);
        }

        if let Some(base_url) = plugin.base_url(app.config().plugin_url()) {
            println!("  Base URL: {}", base_url);
        }

        if let Some(patterns) = plugin.settingspatterns() {
            println!("  Settings:");
            for (key, definition) in patterns {
                println!("    - {} ({})", key, definition.name);
            }
        }
    }

    Ok(())
}

async fn run_toggle(matches: &ArgMatches, name: &str, enable: bool) -> Result<()> {
    let app = utils::create_app(matches).await?;

    let result = if enable {
        app.enable_plugin(name).await
    } else {
        app.disable_plugin(name).await
    };
    let action = if enable { "enable" } else { "disable" };

    if let Err(e) = result {
        eprintln!("Failed to {} plugin '{}': {}", action, name, e);
        return Err(e);
    }

    match utils::find_config_path(matches) {
        Some(config_path) => {
            let mut config = Config::from_file(&config_path)?;
            config.plugins.set_disabled(name, !enable);
            config.save_to_file(&config_path)?;
            println!("Plugin '{}' {}d in {}.", name, action, config_path.display());
        }
        None => {
            println!(
                "Plugin '{}' {}d for this run only; create a configuration file with 'inventree-plugins init' to persist it.",
                name, action
            );
        }
    }

    Ok(())
}
