//! Scanner module - coordinates concurrent connect probes.
//!
//! A single dispatcher task walks the port set and launches one probe per
//! port, never more than `pool_width` at a time. Each probe reports exactly
//! one [`PortResult`] over a channel; the coordinator drains exactly as many
//! results as ports were dispatched and only then sorts the open ports.

pub mod tcp;
pub mod traits;

use crate::types::{Port, PortSet, ScanTarget};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};

pub use tcp::TcpConnectScanner;
pub use traits::{PortResult, PortStatus, Scanner};

/// Number of probes allowed in flight when nothing else is configured.
pub const DEFAULT_POOL_WIDTH: usize = 10;

/// The sorted list of open ports produced by a finished scan.
#[derive(Debug, Clone, Serialize)]
pub struct OpenPortReport {
    target: String,
    ip_address: String,
    ports_scanned: usize,
    pool_width: usize,
    started_at: DateTime<Utc>,
    duration_ms: u64,
    open_ports: Vec<Port>,
}

impl OpenPortReport {
    /// Build the report; `open_ports` is sorted and deduplicated here.
    pub(crate) fn new(
        target: &ScanTarget,
        ports_scanned: usize,
        pool_width: usize,
        started_at: DateTime<Utc>,
        duration: Duration,
        mut open_ports: Vec<Port>,
    ) -> Self {
        open_ports.sort_unstable();
        open_ports.dedup();
        Self {
            target: target.original.clone(),
            ip_address: target.ip.to_string(),
            ports_scanned,
            pool_width,
            started_at,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            open_ports,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn ports_scanned(&self) -> usize {
        self.ports_scanned
    }

    pub fn pool_width(&self) -> usize {
        self.pool_width
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Open ports, strictly ascending.
    pub fn open_ports(&self) -> &[Port] {
        &self.open_ports
    }
}

/// Runs a [`Scanner`] over a [`PortSet`] with bounded concurrency.
pub struct ScanCoordinator<S> {
    scanner: Arc<S>,
    pool_width: usize,
    progress: Option<ProgressBar>,
}

impl<S> ScanCoordinator<S>
where
    S: Scanner + 'static,
{
    pub fn new(scanner: S) -> Self {
        Self {
            scanner: Arc::new(scanner),
            pool_width: DEFAULT_POOL_WIDTH,
            progress: None,
        }
    }

    /// Set how many probes may run at once. Zero is treated as one, and the
    /// width never exceeds what a tokio semaphore can hold.
    pub fn with_pool_width(mut self, pool_width: usize) -> Self {
        self.pool_width = pool_width.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Advance a progress bar once per collected result.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn pool_width(&self) -> usize {
        self.pool_width
    }

    /// Probe every port in `ports` once and return the open ones, sorted.
    pub async fn scan(&self, ports: &PortSet) -> Vec<Port> {
        let expected = ports.len();
        if expected == 0 {
            return Vec::new();
        }

        let (result_tx, mut result_rx) = mpsc::channel::<PortResult>(self.pool_width);
        let dispatcher = tokio::spawn(dispatch(
            ports.as_slice().to_vec(),
            Arc::clone(&self.scanner),
            Arc::new(Semaphore::new(self.pool_width)),
            result_tx,
        ));

        tracing::debug!(ports = expected, pool_width = self.pool_width, "scan started");

        let mut open = Vec::new();
        let mut received = 0;
        while received < expected {
            let Some(result) = result_rx.recv().await else {
                tracing::warn!(
                    received,
                    expected,
                    "result channel closed before every port reported"
                );
                break;
            };
            received += 1;

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
            if result.is_open() {
                tracing::debug!(port = %result.port, "open port");
                if let Some(pb) = &self.progress {
                    pb.set_message(format!("found open port {}", result.port));
                }
                open.push(result.port);
            }
        }
        drop(result_rx);

        if let Err(e) = dispatcher.await {
            tracing::warn!(error = %e, "dispatcher task failed");
        }

        open.sort_unstable();
        tracing::debug!(open = open.len(), "scan finished");
        open
    }
}

/// Launch one probe per port, holding a semaphore permit for each probe's
/// whole lifetime so no more than the pool width run at once.
async fn dispatch<S>(
    ports: Vec<Port>,
    scanner: Arc<S>,
    slots: Arc<Semaphore>,
    results: mpsc::Sender<PortResult>,
) where
    S: Scanner + 'static,
{
    for port in ports {
        let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
            break;
        };
        let scanner = Arc::clone(&scanner);
        let results = results.clone();

        tokio::spawn(async move {
            let result = scanner.scan_port(port).await;
            // The coordinator may already have given up on a dead channel.
            let _ = results.send(result).await;
            drop(permit);
        });
    }
}

/// Configuration for a complete scan of one target.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub target: ScanTarget,
    /// Ports to probe. Defaults to every port.
    pub ports: PortSet,
    pub pool_width: usize,
    /// Per-connect deadline; `None` leaves it to the OS.
    pub timeout: Option<Duration>,
}

impl ScanConfig {
    /// Scan all 65535 ports with the default pool width.
    pub fn new(target: ScanTarget) -> Self {
        Self {
            target,
            ports: PortSet::full(),
            pool_width: DEFAULT_POOL_WIDTH,
            timeout: None,
        }
    }

    pub fn with_ports(mut self, ports: PortSet) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_pool_width(mut self, pool_width: usize) -> Self {
        self.pool_width = pool_width;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Execute a complete TCP connect scan.
pub async fn run_scan(config: ScanConfig, progress: Option<ProgressBar>) -> OpenPortReport {
    let started_at = Utc::now();
    let start_time = Instant::now();

    let scanner = TcpConnectScanner::new(config.target.ip).with_timeout(config.timeout);
    let mut coordinator = ScanCoordinator::new(scanner).with_pool_width(config.pool_width);
    if let Some(pb) = progress.clone() {
        coordinator = coordinator.with_progress(pb);
    }

    let open_ports = coordinator.scan(&config.ports).await;

    if let Some(pb) = progress {
        pb.finish_with_message("scan complete");
    }

    OpenPortReport::new(
        &config.target,
        config.ports.len(),
        coordinator.pool_width(),
        started_at,
        start_time.elapsed(),
        open_ports,
    )
}
