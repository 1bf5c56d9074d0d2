//! Configuration module.
//!
//! Settings resolve in layers: defaults, then the TOML config file, then
//! environment variables, then CLI flags. [`resolve`] runs the whole chain.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{ConfigError, ConfigFile, ResolvedConfig};

use std::path::PathBuf;

/// Values from the command line that take part in config resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Explicit config file (`--config`).
    pub config_path: Option<PathBuf>,
    /// `--rows`.
    pub rows: Option<u16>,
    /// `--cols`.
    pub cols: Option<u16>,
}

/// Load and merge every configuration layer.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
/// Geometry is not validated here; see [`ResolvedConfig::geometry`].
pub fn resolve(cli: CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    let file = loader::load_config_with_precedence(cli.config_path)?;
    let config = loader::merge_config(file);
    let config = loader::apply_env_overrides(config);
    Ok(loader::apply_cli_overrides(config, cli.rows, cli.cols))
}
