//! smoke - headless page smoke-checker.
//!
//! Entry point: parse arguments, initialize logging, run the single
//! observation pass, print the report, and translate the outcome into the
//! process exit code.

use clap::Parser;
use smoke_cli::{check, cli, logger};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init(args.verbose, args.quiet, args.no_color);

    match check::execute(&args).await {
        Ok(report) => {
            print!("{}", report.render());
            report.verdict().exit_code()
        }
        Err(err) => {
            // One diagnostic line, no partial report; the failure is the result.
            eprintln!("headless check failed: {err}");
            ExitCode::from(2)
        }
    }
}
