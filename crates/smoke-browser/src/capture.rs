//! Append-only logs for browser-emitted events.
//!
//! A smoke check passively records three categories of events while a page
//! loads: console messages, uncaught page errors, and failed network
//! requests. Each category accumulates into its own [`EventLog`], written by
//! a CDP observer task and snapshotted exactly once after the observation
//! window closes.
//!
//! # Design Rationale
//!
//! `Arc<Mutex<Vec<T>>>` instead of channels because:
//! 1. Emission order must be preserved within a category
//! 2. There is exactly one writer phase and one reader phase, never
//!    overlapping
//! 3. No backpressure concerns (a single page load emits few events)

use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, EventExceptionThrown};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// A cheaply clonable, append-only buffer of events.
///
/// Observer tasks `push`; the reporting step takes a `snapshot` once the
/// run's observation window has closed. Entries come back in the order they
/// were pushed.
#[derive(Debug)]
pub struct EventLog<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

// Manual impl: `#[derive(Clone)]` would require `T: Clone` even though only
// the Arc is cloned.
impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> EventLog<T> {
    /// Creates a new, empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends an entry.
    ///
    /// If the internal mutex is poisoned (a panic occurred while holding
    /// the lock), the entry is dropped: the panic is the primary failure
    /// and will surface on its own.
    pub(crate) fn push(&self, entry: T) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Returns the number of entries recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> EventLog<T> {
    /// Returns all entries in emission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The severity level of a console message.
///
/// Maps directly to the JavaScript console API that produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs (table, trace, ...)
    Other,
}

impl ConsoleLevel {
    /// Returns true for the levels a smoke check treats as problems.
    #[must_use]
    pub fn is_warning_or_error(self) -> bool {
        matches!(self, ConsoleLevel::Warning | ConsoleLevel::Error)
    }
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warning => "warning",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::Other => "other",
        };
        f.write_str(name)
    }
}

impl From<&EventConsoleApiCalled> for ConsoleLevel {
    fn from(event: &EventConsoleApiCalled) -> Self {
        use chromiumoxide::cdp::js_protocol::runtime::ConsoleApiCalledType;

        match event.r#type {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// One console message: severity level plus formatted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    /// Severity level (log, warning, error, ...)
    pub level: ConsoleLevel,
    /// Formatted message text; multiple arguments are joined with spaces
    pub text: String,
}

impl ConsoleEntry {
    /// Creates a console entry.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// An uncaught exception raised by script code inside the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    /// Textual rendering of the exception, e.g. `Uncaught TypeError: ...`
    pub text: String,
}

impl PageError {
    /// Creates a page error record.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A network request that failed to complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRequest {
    /// The request URL
    pub url: String,
    /// Failure reason reported by the browser, e.g. `net::ERR_FAILED`
    pub reason: String,
}

/// Converts a `Runtime.consoleAPICalled` event into a [`ConsoleEntry`].
///
/// Arguments are rendered from their preview values and joined with spaces;
/// non-primitive arguments render as `<object>`.
pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleEntry {
    let level = ConsoleLevel::from(event);

    let text = event
        .args
        .iter()
        .map(|arg| {
            arg.value
                .as_ref()
                .map(|value| match value.as_str() {
                    Some(s) => s.to_string(),
                    None => value.to_string(),
                })
                .unwrap_or_else(|| "<object>".to_string())
        })
        .collect::<Vec<_>>()
        .join(" ");

    ConsoleEntry::new(level, text)
}

/// Converts a `Runtime.exceptionThrown` event into a [`PageError`].
///
/// Prefers the exception object's description (message plus stack), falling
/// back to the protocol's summary text.
pub(crate) fn parse_exception_event(event: &EventExceptionThrown) -> PageError {
    let details = &event.exception_details;

    let text = details
        .exception
        .as_ref()
        .and_then(|remote| remote.description.clone())
        .unwrap_or_else(|| details.text.clone());

    PageError::new(text)
}
