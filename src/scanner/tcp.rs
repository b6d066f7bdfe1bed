//! TCP Connect Scanner implementation.
//!
//! Performs standard TCP connect scans using the operating system's
//! socket API. The full handshake is completed and the connection is
//! dropped straight away; no data is exchanged.

use crate::scanner::traits::{PortResult, Scanner};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// TCP Connect Scanner.
///
/// Uses standard socket connect() calls to determine port status.
/// Does not require elevated privileges.
///
/// Without a timeout the OS connect behaviour decides how long a
/// silent host is waited on.
pub struct TcpConnectScanner {
    target: IpAddr,
    timeout: Option<Duration>,
}

impl TcpConnectScanner {
    /// Create a new TCP connect scanner with no explicit deadline.
    pub fn new(target: IpAddr) -> Self {
        Self {
            target,
            timeout: None,
        }
    }

    /// Bound each connect attempt.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn target(&self) -> IpAddr {
        self.target
    }

    async fn attempt_connect(&self, addr: SocketAddr) -> io::Result<TcpStream> {
        match self.timeout {
            Some(limit) => timeout(limit, TcpStream::connect(addr))
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))?,
            None => TcpStream::connect(addr).await,
        }
    }
}

#[async_trait]
impl Scanner for TcpConnectScanner {
    async fn scan_port(&self, port: Port) -> PortResult {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match self.attempt_connect(addr).await {
            Ok(stream) => {
                drop(stream);
                tracing::trace!(%addr, "connection accepted");
                PortResult::open(port)
            }
            Err(e) => {
                tracing::trace!(%addr, error = %e, "connection failed");
                PortResult::closed(port)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::{TcpListener, TcpSocket};

    #[test]
    fn test_scanner_creation() {
        let scanner = TcpConnectScanner::new(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(scanner.target(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(scanner.timeout.is_none());
    }

    #[tokio::test]
    async fn test_scan_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let scanner = TcpConnectScanner::new(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(scanner.scan_port(port).await.is_open());
    }

    #[tokio::test]
    async fn test_scan_closed_port() {
        // Bound but never listening: the port stays ours and connects are refused.
        let socket = TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let port = Port::new(socket.local_addr().unwrap().port()).unwrap();

        let scanner = TcpConnectScanner::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_timeout(Some(Duration::from_secs(2)));

        for _ in 0..2 {
            assert!(!scanner.scan_port(port).await.is_open());
        }
    }
}
