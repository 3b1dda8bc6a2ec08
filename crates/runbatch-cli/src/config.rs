//! runbatch configuration.
//!
//! Looked up in order: `--config <path>`, `./runbatch.toml`,
//! `~/.runbatch/config.toml`. A missing file falls back to defaults.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

pub const LOCAL_CONFIG_FILE: &str = "runbatch.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunbatchConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Case table location and format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_table_path")]
    pub path: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: default_table_path(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_table_path() -> String {
    "cases.csv".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// External tool used to prefix printed command lines. Never executed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    /// Executable, e.g. `C:\GAMS\win64\24.2\gams.exe`
    #[serde(default)]
    pub program: Option<String>,
    /// Model file passed to the program ahead of the switches
    #[serde(default)]
    pub model: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub fn level(&self) -> Result<Level> {
        self.level
            .parse()
            .map_err(|_| anyhow!("invalid log level '{}' in configuration", self.level))
    }
}

/// Per-user configuration file: `~/.runbatch/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".runbatch").join("config.toml"))
}

pub fn parse_config(contents: &str) -> Result<RunbatchConfig> {
    Ok(toml::from_str(contents)?)
}

fn read_config(path: &Path) -> Result<RunbatchConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config '{}'", path.display()))
}

/// Load configuration. An explicit path must exist; implicit locations are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<RunbatchConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE)).chain(user_config_path());
    for candidate in candidates {
        if candidate.is_file() {
            return read_config(&candidate);
        }
    }
    Ok(RunbatchConfig::default())
}
