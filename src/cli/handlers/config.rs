//! Config command handlers.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::ConfigCommand;
use crate::cli::config::{CONFIG_ENV, Config, DB_ENV};

/// Runs a `config` subcommand against the file at `path`.
pub fn handle_config(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::List => {
            let config = Config::load_from(path)?;
            for (key, value) in config.entries() {
                println!("{:<15} {}", key, value.as_deref().unwrap_or("(not set)"));
            }
            println!();
            println!("Config file: {}", path.display());
            let overrides: Vec<&str> = ["EDITOR", DB_ENV, CONFIG_ENV]
                .into_iter()
                .filter(|var| std::env::var_os(var).is_some())
                .collect();
            if !overrides.is_empty() {
                println!("Environment overrides: {}", overrides.join(", "));
            }
        }
        ConfigCommand::Get { key } => {
            let config = Config::load_from(path)?;
            match config.get(key)? {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(key, value)?;
            config.save_to(path)?;
            log::info!("set {} in {}", key, path.display());
            println!("Set {} = {}", key, value);
        }
        ConfigCommand::Reset => {
            if path.exists() {
                let backup = backup_path(path);
                fs::copy(path, &backup)
                    .with_context(|| format!("failed to back up config to {}", backup.display()))?;
                println!("Backed up config to {}", backup.display());
            }
            Config::default().save_to(path)?;
            println!("Configuration reset to defaults");
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist yet)");
            }
        }
    }
    Ok(())
}

/// `config.yaml` -> `config.yaml.backup`.
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}
