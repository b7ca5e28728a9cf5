//! Navigation command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("navigation")
        .about("Show navigation links contributed by plugins")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(matches).await?;
    let links = app.navigation_links().await;

    if links.is_empty() {
        println!("No navigation links registered.");
        return Ok(());
    }

    for entry in links {
        println!("{}: {} -> {}", entry.plugin, entry.link.name, entry.link.link);
        for (key, value) in &entry.link.extra {
            println!("    {}: {}", key, value);
        }
    }

    Ok(())
}
