//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use inventree_plugin::MixinKind;

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("InvenTree Plugins - Integration Plugin Host");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));

    if detailed {
        println!("\nSupported mixins:");
        for kind in MixinKind::all() {
            println!("  - {}", kind);
        }
        println!("\nDetailed Information:");
        println!("  - Declarative plugin manifests (plugin.yaml)");
        println!("  - Per-plugin capability registry");
        println!("  - Namespaced plugin settings (PLUGIN_<NAME>_<KEY>)");
        println!("  - URL mounts and navigation links");
        println!("  - Order form catalogue and validation");
        println!("  - Barcode plugin matching");
    }

    Ok(())
}
