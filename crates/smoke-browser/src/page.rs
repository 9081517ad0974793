//! Page wrapper with smoke-check observers.
//!
//! A [`Page`] wraps a browser tab and passively records three categories of
//! events while it loads: console messages, uncaught page errors, and failed
//! network requests. All observers are registered during construction, before
//! any navigation, so early events cannot be missed.

use crate::capture::{
    ConsoleEntry, EventLog, FailedRequest, PageError, parse_console_event, parse_exception_event,
};
use crate::error::{BrowserError, Result};
use crate::net::NetworkWatch;
use crate::wait::{NETWORK_QUIET_PERIOD, WaitConfig, poll_until};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams as NetworkEnableParams, EventLoadingFailed, EventLoadingFinished,
    EventRequestWillBeSent,
};
use chromiumoxide::cdp::js_protocol::runtime::{
    EnableParams as RuntimeEnableParams, EventConsoleApiCalled, EventExceptionThrown,
};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// A browser tab under observation.
///
/// Created by [`HeadlessBrowser::new_page`](crate::HeadlessBrowser::new_page);
/// not constructed directly. The three event logs are append-only while the
/// page is live and are snapshotted by the caller once its observation
/// window has closed.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    console: EventLog<ConsoleEntry>,
    errors: EventLog<PageError>,
    network: NetworkWatch,
    observers: Vec<JoinHandle<()>>,
}

impl Page {
    /// Wraps a raw tab and registers the smoke-check observers.
    ///
    /// Every event stream is registered before this function returns;
    /// a navigation started immediately afterwards cannot outrun them.
    pub(crate) async fn attach(page: ChromePage) -> Result<Self> {
        let inner = Arc::new(page);

        // Event delivery requires the owning CDP domains to be enabled.
        inner.execute(RuntimeEnableParams::default()).await?;
        inner.execute(NetworkEnableParams::default()).await?;

        let console = EventLog::new();
        let errors = EventLog::new();
        let network = NetworkWatch::new();

        let mut console_events = inner.event_listener::<EventConsoleApiCalled>().await?;
        let mut exception_events = inner.event_listener::<EventExceptionThrown>().await?;
        let mut request_events = inner.event_listener::<EventRequestWillBeSent>().await?;
        let mut finished_events = inner.event_listener::<EventLoadingFinished>().await?;
        let mut failed_events = inner.event_listener::<EventLoadingFailed>().await?;

        let mut observers = Vec::with_capacity(5);

        let log = console.clone();
        observers.push(tokio::spawn(async move {
            while let Some(event) = console_events.next().await {
                log.push(parse_console_event(&event));
            }
        }));

        let log = errors.clone();
        observers.push(tokio::spawn(async move {
            while let Some(event) = exception_events.next().await {
                log.push(parse_exception_event(&event));
            }
        }));

        let watch = network.clone();
        observers.push(tokio::spawn(async move {
            while let Some(event) = request_events.next().await {
                watch.request_started(event.request_id.clone(), event.request.url.clone());
            }
        }));

        let watch = network.clone();
        observers.push(tokio::spawn(async move {
            while let Some(event) = finished_events.next().await {
                watch.request_finished(&event.request_id);
            }
        }));

        let watch = network.clone();
        observers.push(tokio::spawn(async move {
            while let Some(event) = failed_events.next().await {
                watch.request_failed(&event.request_id, &event.error_text);
            }
        }));

        Ok(Self {
            inner,
            console,
            errors,
            network,
            observers,
        })
    }

    /// Navigates to an absolute URL and waits for the document to be ready.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::NavigationFailed`] if the browser rejects the
    /// navigation (unreachable host, bad scheme), or a
    /// [`BrowserError::WaitTimeout`] if the document never becomes ready.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_document_ready(WaitConfig::default()).await
    }

    /// Polls `document.readyState` until the page has fully loaded.
    async fn wait_for_document_ready(&self, config: WaitConfig) -> Result<()> {
        poll_until(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Suspends until the network has been quiet for
    /// [`NETWORK_QUIET_PERIOD`] with nothing in flight, or the configured
    /// timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::WaitTimeout`] if the page never goes quiet
    /// within `config.timeout`.
    pub async fn wait_until_network_idle(&self, config: WaitConfig) -> Result<()> {
        let watch = self.network.clone();

        poll_until(
            move || {
                let watch = watch.clone();
                async move { Ok(watch.is_quiet(NETWORK_QUIET_PERIOD)) }
            },
            config,
            "network idle",
        )
        .await
    }

    /// Holds the page open for a fixed delay.
    ///
    /// Gives asynchronous scripts a window to finish emitting events after
    /// the network has settled.
    pub async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    /// Handle to the recorded console messages.
    #[must_use]
    pub fn console(&self) -> &EventLog<ConsoleEntry> {
        &self.console
    }

    /// Handle to the recorded uncaught page errors.
    #[must_use]
    pub fn page_errors(&self) -> &EventLog<PageError> {
        &self.errors
    }

    /// Handle to the recorded failed network requests.
    #[must_use]
    pub fn failed_requests(&self) -> &EventLog<FailedRequest> {
        self.network.failures()
    }

    /// Executes JavaScript in the page context and deserializes the result.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::ScriptFailed`] if execution fails or the
    /// result cannot be deserialized into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script evaluation fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script evaluation fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Stops the observers and closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the underlying page fails.
    pub async fn close(self) -> Result<()> {
        // The observer tasks own the event streams, not the page handle,
        // so aborting them leaves the Arc count to this struct alone.
        for task in &self.observers {
            task.abort();
        }

        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await?;
                Ok(())
            }
            Err(_) => {
                // Outstanding handles exist; the tab is reaped when the
                // browser closes.
                warn!("page close deferred: outstanding references remain");
                Ok(())
            }
        }
    }
}
