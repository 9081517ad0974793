//! Error types for smoke-check browser operations.
//!
//! One enum covers the full run: launch, navigation, waiting, script
//! evaluation, and teardown. Variants carry enough context to print a
//! useful one-line diagnostic; callers are not expected to recover.

use std::time::Duration;
use thiserror::Error;

/// The error type for all browser operations in this crate.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The Chrome process could not be started.
    ///
    /// Usually means Chrome/Chromium is not installed or not executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Underlying error, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason reported by the browser
        reason: String,
    },

    /// A wait condition was not satisfied within its timeout.
    #[error("wait for {condition} timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before giving up
        timeout: Duration,
    },

    /// JavaScript evaluation in the page context failed.
    #[error("script evaluation failed: {0}")]
    ScriptFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Errors surfaced by the DevTools protocol client.
    #[error("devtools protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
