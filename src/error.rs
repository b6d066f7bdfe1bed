//! Error types for vscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Every variant here is
//! fatal and detected before a scan starts; a port that refuses a connection
//! is a normal scan outcome, not an error.

use crate::types::{PortError, TargetError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("address is required")]
    MissingAddress,

    #[error(transparent)]
    Address(#[from] TargetError),

    #[error("invalid port specified: {0}")]
    Ports(#[from] PortError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether usage text should accompany this error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingAddress | Self::Address(_) | Self::Ports(_))
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
