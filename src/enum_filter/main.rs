use clap::Parser;
use enum_filter::{FilterDefinition, Result};
use serde_json::Value;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::print::{print_constants, print_json, print_label, print_list};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    match cli.command {
        Commands::List {
            file,
            only,
            reverse,
            json,
        } => {
            let mut definition = FilterDefinition::load(&file)?;
            definition.reverse_list |= reverse;
            handle_list(definition, &only, json)
        }
        Commands::Label {
            file,
            value,
            default,
        } => handle_label(FilterDefinition::load(&file)?, &value, default),
        Commands::Constants { file, json } => {
            handle_constants(FilterDefinition::load(&file)?, json)
        }
    }
}

fn handle_list(definition: FilterDefinition, only: &[String], json: bool) -> Result<()> {
    let filter = definition.into_filter();
    let only: Vec<&str> = only.iter().map(String::as_str).collect();
    let items = if only.is_empty() {
        filter.create_list(None)
    } else {
        filter.create_list(Some(only.as_slice()))
    };

    if json {
        print_json(&serde_json::to_value(&items)?)
    } else {
        print_list(&items);
        Ok(())
    }
}

fn handle_label(definition: FilterDefinition, value: &str, default: Option<String>) -> Result<()> {
    let default = default.unwrap_or_else(|| definition.default_label.clone());
    let filter = definition.into_filter();
    print_label(&filter.label_or(value, &default));
    Ok(())
}

fn handle_constants(definition: FilterDefinition, json: bool) -> Result<()> {
    let filter = definition.into_filter();
    if json {
        let constants: serde_json::Map<String, Value> = filter
            .constants()
            .map(|(key, alias)| (key.clone(), alias.clone()))
            .collect();
        print_json(&Value::Object(constants))
    } else {
        print_constants(filter.constants());
        Ok(())
    }
}
