//! Configuration management for vscan.
//!
//! Provides XDG-compliant settings storage.

mod settings;

pub use settings::{default_settings_file, AppSettings, OutputFormat};
