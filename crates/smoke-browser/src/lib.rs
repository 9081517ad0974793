//! # smoke-browser
//!
//! Headless Chrome primitives for page smoke checks, built on chromiumoxide.
//!
//! This crate provides everything a single-pass smoke check needs: launching
//! a headless browser, opening a page with its event observers registered
//! before navigation, waiting for the network to go idle, and reading back
//! the three categories of events a page emits while loading.
//!
//! ## Architecture
//!
//! - **HeadlessBrowser**: owns the Chrome process for one run
//! - **Page**: a tab with console, page-error, and network observers attached
//! - **EventLog**: append-only, snapshot-once accumulation of records
//! - **NetworkWatch**: in-flight request bookkeeping and failure records
//! - **WaitConfig / poll_until**: bounded poll-based waits
//!
//! ## Example
//!
//! ```ignore
//! use smoke_browser::{BrowserOptions, HeadlessBrowser, WaitConfig};
//!
//! let browser = HeadlessBrowser::launch(BrowserOptions::default()).await?;
//! let page = browser.new_page().await?;
//!
//! page.navigate("http://localhost:8000").await?;
//! page.wait_until_network_idle(WaitConfig::default()).await?;
//!
//! let console = page.console().snapshot();
//! let errors = page.page_errors().snapshot();
//! let failed = page.failed_requests().snapshot();
//!
//! page.close().await?;
//! browser.close().await?;
//! ```
//!
//! ## Resource Safety
//!
//! The browser process is exclusively owned by one run and is released on
//! all exit paths: explicitly via `close()`, or through Drop when the run
//! unwinds early. Event logs are process-local; nothing is persisted.
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: browser-free logic (log ordering, network bookkeeping,
//!    wait strategies)
//! 2. **Integration tests**: real-browser tests under `tests/`, marked
//!    `#[ignore]` because they require Chrome
//!
//! Run with `cargo test` (unit) or `cargo test -- --ignored` (integration).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod capture;
pub mod error;
pub mod net;
pub mod page;
pub mod wait;

// Re-export main types for convenience
pub use browser::{BrowserOptions, HeadlessBrowser};
pub use capture::{ConsoleEntry, ConsoleLevel, EventLog, FailedRequest, PageError};
pub use error::{BrowserError, Result};
pub use net::NetworkWatch;
pub use page::Page;
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, NETWORK_QUIET_PERIOD, WaitConfig};
