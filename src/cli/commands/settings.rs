//! Settings command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("settings")
        .about("List plugin settings and their current values")
        .arg(utils::config_arg())
        .arg(clap::arg!(--plugin <NAME> "Only show settings of this plugin"))
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(matches).await?;
    let mut settings = app.settings_overview().await;

    if let Some(name) = matches.get_one::<String>("plugin") {
        let keys = app
            .plugin_manager()
            .get_plugin(name)
            .await
            .and_then(|plugin| plugin.settingspatterns())
            .unwrap_or_default();
        settings.retain(|s| keys.contains_key(&s.key));
    }

    if settings.is_empty() {
        println!("No plugin settings found.");
        return Ok(());
    }

    for setting in settings {
        let value = match &setting.value {
            Some(value) => serde_yaml::to_string(value)?.trim_end().to_string(),
            None => "<unset>".to_string(),
        };
        println!("{} = {}", setting.key, value);
        println!("    {}", setting.definition.name);
        if !setting.definition.description.is_empty() {
            println!("    {}", setting.definition.description);
        }
        if let Some(choices) = &setting.definition.choices {
            println!("    Choices: {}", choices.join(", "));
        }
    }

    Ok(())
}
