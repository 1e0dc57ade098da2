//! Application configuration for stima.
//!
//! User config lives at `~/.stima/stima.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StimaError};
use crate::types::RateConfig;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "stima.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".stima";

// ---------------------------------------------------------------------------
// Config structs (matching stima.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hourly rates and weekly throughput.
    #[serde(default)]
    pub rates: RateConfig,

    /// Output sinks.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Copy the summary to the clipboard unless `--no-clipboard` is given.
    #[serde(default = "default_true")]
    pub clipboard: bool,

    /// Explicit clipboard helper (program followed by its arguments).
    /// Empty means auto-detect per platform.
    #[serde(default)]
    pub clipboard_command: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clipboard: true,
            clipboard_command: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.stima/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| StimaError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.stima/stima.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| StimaError::config(format!("failed to read {}: {e}", path.display())))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        StimaError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(?path, "loaded config file");
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| StimaError::output_write(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| StimaError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| StimaError::output_write(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
