//! Config command: view and modify configuration settings.

use clap::Subcommand;

use tilesift::config::{config_file_path, ConfigKey};

use crate::commands::common;
use crate::error::CliError;

/// Subcommands of `tilesift config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the value of one setting
    Get {
        /// Setting name, e.g. paths.source_dir
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting name, e.g. paths.source_dir
        key: String,
        /// New value; an empty string clears a path setting
        value: String,
    },
    /// Show all settings
    List,
    /// Show the configuration file location
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "unknown setting '{}'. Run 'tilesift config list' to see all settings",
            key
        ))
    })
}

fn run_get(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let config = common::load_config();
    let value = key.get(&config);
    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut config = common::load_config();
    key.set(&mut config, value)?;
    config.save()?;
    if value.is_empty() {
        println!("Cleared {}", key.name());
    } else {
        println!("Set {} = {}", key.name(), value);
    }
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = common::load_config();
    let mut section = "";
    for key in ConfigKey::all() {
        if key.section() != section {
            if !section.is_empty() {
                println!();
            }
            println!("[{}]", key.section());
            section = key.section();
        }
        let value = key.get(&config);
        if value.is_empty() {
            println!("  {} = (not set)", key.key_name());
        } else {
            println!("  {} = {}", key.key_name(), value);
        }
    }
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}
