//! Barcode command implementation

use crate::cli::utils;
use crate::BarcodeRegistry;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("barcode")
        .about("Find the barcode plugin that accepts a payload")
        .arg(clap::arg!(<DATA> "Barcode payload"))
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let data = utils::required(matches, "DATA")?;
    let registry = BarcodeRegistry::builtin();

    match registry.match_barcode(data) {
        Some(plugin) => println!("Barcode accepted by plugin: {}", plugin.name()),
        None => {
            let names: Vec<&str> = registry.plugins().map(|p| p.name()).collect();
            println!("No barcode plugin accepted the data (tried: {}).", names.join(", "));
        }
    }

    Ok(())
}
