// vscan - a TCP connect port scanner

use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use vscan::cli::Args;
use vscan::logging::init_logging;
use vscan::output;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match args.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            if e.is_usage() {
                eprintln!();
                let _ = Args::command().write_help(&mut std::io::stderr());
            }
            ExitCode::FAILURE
        }
    }
}
