//! Error handling for the smoke CLI.
//!
//! There is exactly one outward failure class - "the check failed" - so the
//! CLI error type is thin: it wraps the library's browser errors and adds
//! the few failure modes that originate in the CLI itself.

use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Any failure in the browser layer: launch, navigation, waits, teardown.
    #[error("{0}")]
    Browser(#[from] smoke_browser::BrowserError),

    /// A target that passed argument parsing but cannot be checked.
    #[error("invalid target '{url}': {reason}")]
    InvalidTarget {
        /// The offending URL
        url: String,
        /// Why it cannot be checked
        reason: String,
    },

    /// I/O errors from writing the report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
