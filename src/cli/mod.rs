//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("inventree-plugins")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Inspect and manage InvenTree integration plugins")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::info::command())
            .subcommand(commands::plugins::command())
            .subcommand(commands::settings::command())
            .subcommand(commands::urls::command())
            .subcommand(commands::navigation::command())
            .subcommand(commands::barcode::command())
            .subcommand(commands::forms::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            Some(("plugins", sub_matches)) => commands::plugins::run(sub_matches).await,
            Some(("settings", sub_matches)) => commands::settings::run(sub_matches).await,
            Some(("urls", sub_matches)) => commands::urls::run(sub_matches).await,
            Some(("navigation", sub_matches)) => commands::navigation::run(sub_matches).await,
            Some(("barcode", sub_matches)) => commands::barcode::run(sub_matches).await,
            Some(("forms", sub_matches)) => commands::forms::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use clap::{Arg, ArgMatches};
    use std::path::PathBuf;
    use tracing::info;

    /// Configuration file names searched in the working directory
    pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
        ".inventree-plugins.yaml",
        ".inventree-plugins.yml",
        "inventree-plugins.yaml",
        "inventree-plugins.yml",
    ];

    /// The `--config` argument shared by commands that read the configuration
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Configuration file from arguments, the working directory or the user config directory
    pub fn find_config_path(matches: &ArgMatches) -> Option<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Some(PathBuf::from(config_path));
        }

        let user_config =
            dirs::config_dir().map(|dir| dir.join("inventree").join("plugins.yaml"));

        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .chain(user_config)
            .find(|path| path.exists())
    }

    /// Get configuration file path, failing when none exists
    pub fn get_config_path(matches: &ArgMatches) -> Result<PathBuf> {
        find_config_path(matches).ok_or_else(|| {
            anyhow!("No configuration file found. Use --config to specify a file or create one with 'inventree-plugins init'")
        })
    }

    /// Load configuration from file, using defaults when no file exists
    pub fn load_config(matches: &ArgMatches) -> Result<crate::Config> {
        match find_config_path(matches) {
            Some(config_path) => crate::Config::from_file(&config_path),
            None => {
                info!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create and initialize the plugin host
    pub async fn create_app(matches: &ArgMatches) -> Result<crate::InvenTreePlugins> {
        let config = load_config(matches)?;
        let app = crate::InvenTreePlugins::new(config)?;
        app.initialize_plugins().await?;
        Ok(app)
    }

    /// Required positional argument
    pub fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
        matches
            .get_one::<String>(name)
            .ok_or_else(|| anyhow!("Missing argument: {}", name))
    }
}
