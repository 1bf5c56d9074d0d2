//! Configuration file loading with precedence handling.

use crate::model::{Geometry, InvalidGeometry};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HEXVIEW_CONFIG";
/// Environment variable overriding the row count.
pub const ROWS_ENV: &str = "HEXVIEW_ROWS";
/// Environment variable overriding the column count.
pub const COLS_ENV: &str = "HEXVIEW_COLS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Resolved rows/cols do not form a usable grid.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/hexview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per window.
    #[serde(default)]
    pub rows: Option<u16>,

    /// Bytes per row.
    #[serde(default)]
    pub cols: Option<u16>,

    /// Extra attempts for a failed read.
    #[serde(default)]
    pub io_retries: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per window.
    pub rows: u16,
    /// Bytes per row.
    pub cols: u16,
    /// Extra attempts for a failed read.
    pub io_retries: u32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            rows: geometry.rows(),
            cols: geometry.cols(),
            io_retries: 1,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validated window geometry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Geometry` if rows or cols is zero.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Ok(Geometry::new(self.rows, self.cols)?)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hexview/hexview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("hexview").join("hexview.log")
    } else {
        PathBuf::from("hexview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/hexview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HEXVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/hexview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        rows: config.rows.unwrap_or(defaults.rows),
        cols: config.cols.unwrap_or(defaults.cols),
        io_retries: config.io_retries.unwrap_or(defaults.io_retries),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `HEXVIEW_ROWS`: Override rows
/// - `HEXVIEW_COLS`: Override cols
///
/// Values that are not valid `u16` integers are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(rows) = env_u16(ROWS_ENV) {
        config.rows = rows;
    }
    if let Some(cols) = env_u16(COLS_ENV) {
        config.cols = cols;
    }
    config
}

fn env_u16(name: &str) -> Option<u16> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(var = name, value = %raw, %error, "Ignoring invalid environment override");
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    rows_override: Option<u16>,
    cols_override: Option<u16>,
) -> ResolvedConfig {
    if let Some(rows) = rows_override {
        config.rows = rows;
    }
    if let Some(cols) = cols_override {
        config.cols = cols;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
