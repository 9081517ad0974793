//! smoke CLI - headless page smoke-checker.
//!
//! Loads a target URL in headless Chrome and reports three categories of
//! events the page emitted while loading: console messages, uncaught page
//! errors, and failed network requests. The report prints to stdout in
//! three labeled sections; logs go to stderr.
//!
//! # Architecture
//!
//! - [`cli`] - argument parsing and target validation
//! - [`check`] - the single observation pass
//! - [`report`] - pure report rendering and the clean/problems verdict
//! - [`error`] - CLI error type wrapping the browser layer
//! - [`logger`] - tracing setup
//!
//! # Exit Codes
//!
//! - `0` - the page loaded and nothing suspicious was recorded
//! - `1` - the page loaded but problems were recorded
//! - `2` - the check itself failed (launch, navigation, teardown)

// Public modules
pub mod check;
pub mod cli;
pub mod error;
pub mod logger;
pub mod report;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use report::{CheckReport, Verdict};
