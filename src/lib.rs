//! # vscan - A TCP Connect Port Scanner
//!
//! vscan determines which TCP ports on a host accept a connection. Ports
//! are probed by a fixed-width pool of concurrent tasks and the open ones
//! are reported in ascending order once every probe has finished.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use vscan::scanner::{run_scan, ScanConfig};
//! use vscan::types::{PortSet, ScanTarget};
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::resolve("127.0.0.1").await.unwrap();
//!     let ports: PortSet = "22,80,8000-8100".parse().unwrap();
//!
//!     let report = run_scan(ScanConfig::new(target).with_ports(ports), None).await;
//!     for port in report.open_ports() {
//!         println!("{} open", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Port expressions, port sets and scan targets
//! - [`scanner`] - The connect probe and the worker-pool coordinator
//! - [`config`] - Settings file handling
//! - [`output`] - Plain text and JSON output
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError};
pub use scanner::{OpenPortReport, PortResult, PortStatus, ScanCoordinator, Scanner};
pub use types::{Port, PortError, PortExpression, PortSet, ScanTarget, TargetError};
