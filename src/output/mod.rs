//! Output formatting module.
//!
//! Provides formatters for plain text and JSON output of scan results.

mod json_format;
mod plain;

pub use json_format::print_json;
pub use plain::{print_error, print_kickoff, print_plain, print_warning};

use crate::config::OutputFormat;
use crate::scanner::OpenPortReport;
use std::io;

/// Format and print scan results according to the specified format.
pub fn print_results(report: &OpenPortReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(report),
        OutputFormat::Json => json_format::print_json(report),
    }
}
