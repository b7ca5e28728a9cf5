//! Order forms CLI commands

use crate::cli::utils;
use crate::forms::order;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("forms")
        .about("Inspect order forms")
        .subcommand_negates_reqs(true)
        .subcommand(Command::new("list").about("List order forms"))
        .subcommand(
            Command::new("show")
                .about("Show the fields of a form")
                .arg(clap::arg!(<NAME> "Form name"))
                .arg(clap::arg!(--check <JSON> "Validate a JSON submission against the form")),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", _)) => {
            for form in order::catalogue() {
                println!("{} ({})", form.name, form.model);
            }
            Ok(())
        }
        Some(("show", sub_matches)) => {
            let name = utils::required(sub_matches, "NAME")?;
            run_show(name, sub_matches.get_one::<String>("check"))
        }
        _ => {
            let _ = command().print_help();
            Ok(())
        }
    }
}

fn run_show(name: &str, check: Option<&String>) -> Result<()> {
    let form = order::find(name).ok_or_else(|| anyhow!("Form '{}' not found", name))?;

    println!("{} ({})", form.name, form.model);
    for field in &form.fields {
        let required = if field.required { " *" } else { "" };
        println!("  {}{}: {}", field.name, required, field.kind);
        if let Some(label) = &field.label {
            println!("      label: {}", label);
        }
        if let Some(help_text) = &field.help_text {
            println!("      help: {}", help_text);
        }
        if let Some(prefix) = &field.prefix {
            println!("      prefix: {}", prefix);
        }
        if let Some(placeholder) = &field.placeholder {
            println!("      placeholder: {}", placeholder);
        }
    }

    if let Some(submission) = check {
        let submission: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(submission)?;
        let errors = form.validate(&submission);
        if errors.is_empty() {
            println!("\nSubmission is valid.");
        } else {
            println!("\nSubmission errors:");
            for error in &errors {
                println!("  - {}", error);
            }
            return Err(anyhow!("{} field(s) failed validation", errors.len()));
        }
    }

    Ok(())
}
