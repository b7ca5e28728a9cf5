//! Validate command implementation

use crate::cli::utils;
use crate::Config;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config_path = utils::get_config_path(matches)?;
    info!("Validating configuration file: {:?}", config_path);

    let config = Config::from_file(&config_path)?;
    config.validate()?;

    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!("Plugin URL: /{}/", config.plugin_url());
    println!(
        "External discovery: {}",
        if config.plugins.enable_external_discovery {
            "enabled"
        } else {
            "disabled"
        }
    );

    println!("Plugin directories:");
    for dir in &config.plugins.plugin_directories {
        println!("  - {}", dir.display());
    }

    if !config.plugins.disabled.is_empty() {
        println!("Disabled plugins: {}", config.plugins.disabled.join(", "));
    }
    println!("Setting overrides: {}", config.settings.len());

    Ok(())
}
