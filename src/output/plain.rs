//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::OpenPortReport;
use crate::types::{PortSet, ScanTarget};
use console::style;
use std::io::{self, Write};

/// How many ports the kickoff line lists before eliding the rest.
const PREVIEW_LEN: usize = 3;

/// Print results in human-readable plain text format.
pub fn print_plain(report: &OpenPortReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plain(&mut out, report)
}

fn write_plain<W: Write>(out: &mut W, report: &OpenPortReport) -> io::Result<()> {
    writeln!(out)?;
    for port in report.open_ports() {
        writeln!(out, "  {:>5}  {}", port, style("open").green().bold())?;
    }
    if report.open_ports().is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{} Scan completed: {} open of {} ports scanned in {:.2}s",
        style("✓").green().bold(),
        style(report.open_ports().len()).green().bold(),
        report.ports_scanned(),
        report.duration_ms() as f64 / 1000.0
    )?;

    Ok(())
}

/// Print the line announcing what is about to be scanned.
pub fn print_kickoff(target: &ScanTarget, ports: &PortSet) {
    println!(
        "{} Scanning target: {}",
        style("•").dim(),
        style(target).white().bold()
    );
    println!(
        "{} Ports to be scanned: {}",
        style("•").dim(),
        format_preview(ports)
    );
}

/// `"80, 443, 8080 ... (total: 1002)"`.
fn format_preview(ports: &PortSet) -> String {
    let shown: Vec<String> = ports
        .preview(PREVIEW_LEN)
        .iter()
        .map(ToString::to_string)
        .collect();
    let elided = if ports.len() > PREVIEW_LEN { " ..." } else { "" };
    format!("{}{} (total: {})", shown.join(", "), elided, ports.len())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use chrono::Utc;
    use std::time::Duration;

    fn report(open: &[u16]) -> OpenPortReport {
        let target = ScanTarget::new("localhost", "127.0.0.1".parse().unwrap());
        let open = open.iter().filter_map(|&p| Port::new(p)).collect();
        OpenPortReport::new(&target, 100, 10, Utc::now(), Duration::from_millis(1500), open)
    }

    fn render(report: &OpenPortReport) -> String {
        let mut buf = Vec::new();
        write_plain(&mut buf, report).unwrap();
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned()
    }

    #[test]
    fn test_open_ports_listed_ascending() {
        let text = render(&report(&[443, 22]));
        let lines: Vec<&str> = text.lines().filter(|l| l.contains("open")).collect();
        assert_eq!(lines[0].trim(), "22  open");
        assert_eq!(lines[1].trim(), "443  open");
        assert!(text.contains("Scan completed: 2 open of 100 ports scanned in 1.50s"));
    }

    #[test]
    fn test_no_open_ports() {
        let text = render(&report(&[]));
        assert!(text.contains("No open ports found."));
        assert!(text.contains("0 open of 100"));
    }

    #[test]
    fn test_format_preview() {
        let ports: PortSet = "80,443".parse().unwrap();
        assert_eq!(format_preview(&ports), "80, 443 (total: 2)");

        let ports: PortSet = "22,1-10".parse().unwrap();
        assert_eq!(format_preview(&ports), "22, 1, 2 ... (total: 11)");

        assert_eq!(format_preview(&PortSet::default()), " (total: 0)");
    }
}
