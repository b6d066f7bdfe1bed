//! Application settings and paths.
//!
//! Settings live in an optional JSON file in the XDG config directory
//! (`~/.config/vscan/settings.json`). A missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::DEFAULT_POOL_WIDTH;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path to the default settings file, if a config directory exists.
pub fn default_settings_file() -> ConfigResult<PathBuf> {
    let project = ProjectDirs::from("", "", "vscan").ok_or(ConfigError::DirectoryNotFound)?;
    Ok(project.config_dir().join("settings.json"))
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Number of concurrent probes.
    pub pool_width: usize,
    /// Per-connect timeout in milliseconds; absent means the OS default.
    pub connect_timeout_ms: Option<u64>,
    /// Default output format.
    pub output_format: OutputFormat,
    /// Show a progress bar while scanning.
    pub progress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            pool_width: DEFAULT_POOL_WIDTH,
            connect_timeout_ms: None,
            output_format: OutputFormat::Plain,
            progress: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when there is no settings file.
    pub fn load() -> ConfigResult<Self> {
        let file = match default_settings_file() {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using default settings");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}
