//! Command-line interface definitions for vscan.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::config::{AppSettings, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;
use crate::scanner::{run_scan, ScanConfig};
use crate::types::{PortSet, ScanTarget};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// A TCP connect port scanner.
#[derive(Parser, Debug)]
#[command(name = "vscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A TCP connect port scanner", long_about = None)]
pub struct Args {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Target IP address or hostname (used when TARGET is not given)
    #[arg(long, value_name = "HOST")]
    pub address: Option<String>,

    /// Ports to scan (e.g., "80", "80,443", "1-1000", "22,80,8000-9000"); all ports if omitted
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Number of concurrent probes [default: 10]
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Connection timeout in milliseconds [default: OS connect timeout]
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Output format for results [default: plain]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Show a progress bar while scanning
    #[arg(long)]
    pub progress: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "VSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// The target to scan; the positional argument wins over `--address`.
    pub fn address(&self) -> Option<&str> {
        [self.target.as_deref(), self.address.as_deref()]
            .into_iter()
            .flatten()
            .find(|a| !a.trim().is_empty())
    }

    /// The port set to scan. No expression (or an empty one) means every port.
    pub fn port_set(&self) -> CliResult<PortSet> {
        match self.ports.as_deref().filter(|p| !p.is_empty()) {
            Some(expression) => Ok(PortSet::parse(expression)?),
            None => Ok(PortSet::full()),
        }
    }

    /// Load settings from `--config`, or the default location if present.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Validate the input, run the scan and print the results.
    pub async fn execute(&self) -> CliResult<()> {
        let settings = self.settings()?;
        let address = self.address().ok_or(CliError::MissingAddress)?;
        let target = ScanTarget::resolve(address).await?;
        let ports = self.port_set()?;

        let format = self.output.unwrap_or(settings.output_format);
        let pool_width = self.workers.unwrap_or(settings.pool_width);
        let timeout = self
            .timeout
            .map(Duration::from_millis)
            .or_else(|| settings.connect_timeout());
        let chatty = format == OutputFormat::Plain && !self.quiet;

        if chatty {
            output::print_kickoff(&target, &ports);
        }
        if ports.is_empty() {
            output::print_warning("no ports in 1-65535 to scan");
        }

        let progress = (chatty && (self.progress || settings.progress))
            .then(|| progress_bar(ports.len() as u64));

        let config = ScanConfig::new(target)
            .with_ports(ports)
            .with_pool_width(pool_width)
            .with_timeout(timeout);
        let report = run_scan(config, progress).await;

        output::print_results(&report, format)?;
        Ok(())
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("vscan").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_address_wins() {
        let a = args(&["10.0.0.1", "--address", "10.0.0.2"]);
        assert_eq!(a.address(), Some("10.0.0.1"));

        let a = args(&["--address", "10.0.0.2"]);
        assert_eq!(a.address(), Some("10.0.0.2"));

        assert_eq!(args(&[]).address(), None);
        assert_eq!(args(&["--address", ""]).address(), None);
    }

    #[test]
    fn test_default_ports_are_full_range() {
        assert_eq!(args(&["host"]).port_set().unwrap().len(), 65535);
        assert_eq!(args(&["host", "--ports", ""]).port_set().unwrap().len(), 65535);
    }

    #[test]
    fn test_port_expression() {
        let set = args(&["host", "-p", "80,80,443"]).port_set().unwrap();
        assert_eq!(set.len(), 2);

        let err = args(&["host", "-p", "5-5"]).port_set().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(args(&["host", "-vv"]).verbose, 2);
        assert!(Args::try_parse_from(["vscan", "host", "-v", "-q"]).is_err());
    }

    #[tokio::test]
    async fn test_missing_address_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("settings.json");
        std::fs::write(&config, "{}").unwrap();

        let a = args(&["--config", config.to_str().unwrap()]);
        let err = a.execute().await.unwrap_err();
        assert!(matches!(err, CliError::MissingAddress));
        assert!(err.is_usage());
    }

    #[tokio::test]
    async fn test_bad_ports_fail_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("settings.json");
        std::fs::write(&config, "{}").unwrap();

        let a = args(&["127.0.0.1", "-p", "abc", "--config", config.to_str().unwrap()]);
        assert!(matches!(a.execute().await, Err(CliError::Ports(_))));
    }
}
