//! URLs command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("urls")
        .about("Show URL mounts contributed by plugins")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(matches).await?;
    let mounts = app.url_mounts().await;

    if mounts.is_empty() {
        println!("No plugin URLs registered.");
        return Ok(());
    }

    for (base_url, mount) in mounts {
        println!("{} (namespace '{}')", base_url, mount.namespace);
        for (route, pattern) in mount.routes.iter().zip(mount.full_patterns()) {
            match route.name.as_deref().and_then(|n| mount.qualified_name(n)) {
                Some(name) => println!("  {} -> {} [{}]", pattern, route.view, name),
                None => println!("  {} -> {}", pattern, route.view),
            }
        }
    }

    Ok(())
}
