//! Scanner trait abstraction.
//!
//! Defines the probe interface the coordinator drives, so the worker pool
//! can be exercised with test doubles as well as real sockets.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// The connection was accepted.
    Open,
    /// The connection was refused, timed out, or the host was unreachable.
    Closed,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of scanning a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    /// The port number that was scanned.
    pub port: Port,
    /// Status determined by the scan.
    pub status: PortStatus,
}

impl PortResult {
    pub fn open(port: Port) -> Self {
        Self {
            port,
            status: PortStatus::Open,
        }
    }

    pub fn closed(port: Port) -> Self {
        Self {
            port,
            status: PortStatus::Closed,
        }
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Trait for single-port probes.
///
/// Implementations must always produce a result: a failed probe is a
/// `Closed` port, never an error.
///
/// # Example
///
/// ```ignore
/// use vscan::scanner::{PortResult, Scanner};
///
/// async fn probe<S: Scanner>(scanner: &S, port: Port) -> PortResult {
///     scanner.scan_port(port).await
/// }
/// ```
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Probe a single port.
    async fn scan_port(&self, port: Port) -> PortResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_status_display() {
        assert_eq!(PortStatus::Open.to_string(), "open");
        assert_eq!(PortStatus::Closed.to_string(), "closed");
    }

    #[test]
    fn test_port_result() {
        let port = Port::new(80).unwrap();
        assert!(PortResult::open(port).is_open());
        assert!(!PortResult::closed(port).is_open());
        assert_eq!(PortResult::closed(port).port, port);
    }
}
