//! JSON output formatting.

use crate::scanner::OpenPortReport;
use std::io;

/// Print results in JSON format.
pub fn print_json(report: &OpenPortReport) -> io::Result<()> {
    println!("{}", to_json(report)?);
    Ok(())
}

fn to_json(report: &OpenPortReport) -> io::Result<String> {
    serde_json::to_string_pretty(report).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, ScanTarget};
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_report_json_shape() {
        let target = ScanTarget::new("localhost", "127.0.0.1".parse().unwrap());
        let open = vec![Port::new(8080).unwrap(), Port::new(22).unwrap()];
        let report = OpenPortReport::new(&target, 3, 10, Utc::now(), Duration::from_millis(42), open);

        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(value["target"], "localhost");
        assert_eq!(value["ip_address"], "127.0.0.1");
        assert_eq!(value["ports_scanned"], 3);
        assert_eq!(value["duration_ms"], 42);
        assert_eq!(value["open_ports"], serde_json::json!([22, 8080]));
    }
}
