//! Logging setup for the smoke CLI.
//!
//! Structured logging via the `tracing` ecosystem. All log output goes to
//! stderr so the report on stdout stays clean for piping and comparison.
//!
//! Verbosity is resolved in this order:
//! 1. `--verbose`: debug level for smoke crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` environment variable
//! 4. Default: info level for smoke crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("smoke_cli=debug,smoke_browser=debug")
    } else if quiet {
        EnvFilter::new("smoke_cli=error,smoke_browser=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("smoke_cli=info,smoke_browser=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    // tracing is global and can only be initialized once per process, so
    // these only verify filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _filter = EnvFilter::new("smoke_cli=debug,smoke_browser=debug");
    }

    #[test]
    fn quiet_filter_parses() {
        let _filter = EnvFilter::new("smoke_cli=error,smoke_browser=error");
    }
}
