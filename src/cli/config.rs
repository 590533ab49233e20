//! Configuration file support.

use crate::domain::ValidationError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding the database location.
pub const DB_ENV: &str = "QNOTE_DB";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "QNOTE_CONFIG";

/// Color preference for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Auto => "auto",
            Theme::Dark => "dark",
            Theme::Light => "light",
        };
        f.write_str(name)
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Theme::Auto),
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ValidationError::new(format!(
                "invalid theme '{}' (expected auto, dark or light)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Application configuration loaded from the YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor command for composing notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Pager command for long output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager: Option<String>,

    pub theme: Theme,

    pub database: DatabaseConfig,
}

impl Config {
    /// Keys accepted by `config get` and `config set`.
    pub const KEYS: [&'static str; 4] = ["editor", "pager", "theme", "database.path"];

    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Writes the configuration as YAML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self).context("failed to serialize config")?;
        fs::write(path, yaml)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$QNOTE_CONFIG` if set, otherwise `~/.config/qnote/config.yaml`.
    pub fn config_path() -> PathBuf {
        non_empty_env(CONFIG_ENV).map(PathBuf::from).unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("qnote")
                .join("config.yaml")
        })
    }

    /// Default database location: `~/.local/share/qnote/qnote.db` on Linux.
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qnote")
            .join("qnote.db")
    }

    /// Resolve the database path.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. `$QNOTE_DB`
    /// 3. Config file `database.path` setting
    /// 4. Platform data directory
    pub fn database_path(&self, cli_db: Option<&Path>) -> PathBuf {
        self.resolve_database_path(cli_db, non_empty_env(DB_ENV).map(PathBuf::from))
    }

    fn resolve_database_path(&self, cli_db: Option<&Path>, env_db: Option<PathBuf>) -> PathBuf {
        cli_db
            .map(Path::to_path_buf)
            .or(env_db)
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(Self::default_database_path)
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| non_empty_env("EDITOR"))
            .or_else(|| non_empty_env("VISUAL"))
            .unwrap_or_else(|| "vi".to_string())
    }

    // ===========================================
    // Key access
    // ===========================================

    /// Returns the value of a dotted key, `None` if unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ValidationError> {
        match key {
            "editor" => Ok(self.editor.clone()),
            "pager" => Ok(self.pager.clone()),
            "theme" => Ok(Some(self.theme.to_string())),
            "database.path" => Ok(self
                .database
                .path
                .as_ref()
                .map(|p| p.display().to_string())),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets a dotted key. An empty value unsets optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        let optional = (!value.is_empty()).then(|| value.to_string());
        match key {
            "editor" => self.editor = optional,
            "pager" => self.pager = optional,
            "theme" => self.theme = value.parse()?,
            "database.path" => self.database.path = optional.map(PathBuf::from),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Every key with its current value, in display order.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or(None)))
            .collect()
    }
}

fn unknown_key(key: &str) -> ValidationError {
    ValidationError::new(format!(
        "unknown config key '{}' (expected one of: {})",
        key,
        Config::KEYS.join(", ")
    ))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
