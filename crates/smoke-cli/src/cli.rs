//! Command-line interface definition for the smoke checker.
//!
//! A single-purpose tool, so there are no subcommands: `smoke [TARGET]`
//! runs one observation pass and prints the report.

use clap::Parser;

/// Default target when none is given: the local dev server.
pub const DEFAULT_TARGET: &str = "http://localhost:8000";

/// smoke - headless page smoke-checker
#[derive(Parser, Debug)]
#[command(
    name = "smoke",
    version,
    about = "Headless page smoke-checker",
    long_about = "Loads a page in headless Chrome and reports the console messages,\n\
                  uncaught page errors, and failed network requests it emitted while\n\
                  loading. Exits 0 when the page is clean, 1 when problems were\n\
                  recorded, 2 when the check itself failed."
)]
pub struct Cli {
    /// Target URL to check
    #[arg(default_value = DEFAULT_TARGET, value_parser = parse_target)]
    pub target: String,

    /// Path to the Chrome/Chromium executable (auto-detected when omitted)
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<String>,

    /// Run with a visible browser window (for debugging a check by eye)
    #[arg(long)]
    pub headful: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all log output except errors
    ///
    /// The report itself always prints; logs go to stderr.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

/// Parse and validate a target URL.
///
/// The browser only checks http(s) pages; anything else is rejected before
/// a Chrome process is ever launched.
///
/// # Errors
///
/// Returns an error message for empty targets or non-http(s) schemes.
pub fn parse_target(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("target URL cannot be empty".to_string());
    }

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return Err(format!("target must be an http(s) URL: '{s}'"));
    }

    Ok(s.to_string())
}
