//! Scan target parsing and resolution.
//!
//! A target is either an IP literal or a hostname. Hostnames are resolved
//! once, before scanning, and the first address returned is probed.

use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }

    /// Parse an IP literal, or resolve a hostname through the system resolver
    /// configuration.
    pub async fn resolve(input: &str) -> Result<Self, TargetError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TargetError::Empty);
        }

        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(Self::new(input, ip));
        }

        // `localhost` and friends come from the hosts file, which the
        // resolver consults before going to the network.
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| TargetError::DnsResolutionFailed(input.to_string(), e.to_string()))?;

        let response = resolver
            .lookup_ip(input)
            .await
            .map_err(|e| TargetError::DnsResolutionFailed(input.to_string(), e.to_string()))?;

        let ip = response
            .iter()
            .next()
            .ok_or_else(|| TargetError::NoAddressesFound(input.to_string()))?;

        tracing::debug!(host = input, %ip, "resolved target");
        Ok(Self::new(input, ip))
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Error type for target resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("address is empty")]
    Empty,
    #[error("invalid address '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("invalid address '{0}': no IP addresses found")]
    NoAddressesFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let target = ScanTarget::resolve("192.168.1.1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(target.to_string(), "192.168.1.1");
    }

    #[tokio::test]
    async fn test_resolve_ipv6_literal() {
        let target = ScanTarget::resolve("::1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_empty() {
        assert!(matches!(
            ScanTarget::resolve("  ").await,
            Err(TargetError::Empty)
        ));
    }

    #[test]
    fn test_display_with_hostname() {
        let target = ScanTarget::new("router.lan", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(target.to_string(), "router.lan (10.0.0.1)");
    }
}
