//! Network activity bookkeeping for a single page.
//!
//! Two consumers share the same request-lifecycle stream: the network-idle
//! wait needs to know whether anything is still in flight, and the smoke
//! report needs a record of every request that failed to complete. Both are
//! served by [`NetworkWatch`], fed from the page's CDP network observers.
//!
//! The DevTools protocol reports a failure (`Network.loadingFailed`) by
//! request id only, so the watch keeps an id-to-URL map built from
//! `Network.requestWillBeSent` to recover the URL for the failure record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::network::RequestId;

use crate::capture::{EventLog, FailedRequest};

/// Placeholder URL for a failure whose request start was never observed.
const UNKNOWN_URL: &str = "<unknown>";

#[derive(Debug)]
struct WatchState {
    /// URLs of requests that have started but not yet finished or failed.
    in_flight: HashMap<RequestId, String>,
    /// Instant of the most recent request lifecycle event.
    last_activity: Instant,
}

/// Tracks request lifecycle events for one page.
///
/// Cheaply clonable: observer tasks write through one clone while the
/// navigation wait polls another.
#[derive(Debug, Clone)]
pub struct NetworkWatch {
    state: Arc<Mutex<WatchState>>,
    failures: EventLog<FailedRequest>,
}

impl NetworkWatch {
    /// Creates a watch with no observed activity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(WatchState {
                in_flight: HashMap::new(),
                last_activity: Instant::now(),
            })),
            failures: EventLog::new(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WatchState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Records a request starting.
    pub(crate) fn request_started(&self, id: RequestId, url: String) {
        let mut state = self.lock();
        state.in_flight.insert(id, url);
        state.last_activity = Instant::now();
    }

    /// Records a request completing successfully.
    pub(crate) fn request_finished(&self, id: &RequestId) {
        let mut state = self.lock();
        state.in_flight.remove(id);
        state.last_activity = Instant::now();
    }

    /// Records a request failing, appending to the failure log.
    pub(crate) fn request_failed(&self, id: &RequestId, reason: &str) {
        let url = {
            let mut state = self.lock();
            let url = state
                .in_flight
                .remove(id)
                .unwrap_or_else(|| UNKNOWN_URL.to_string());
            state.last_activity = Instant::now();
            url
        };

        self.failures.push(FailedRequest {
            url,
            reason: reason.to_string(),
        });
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Time elapsed since the last request lifecycle event.
    #[must_use]
    pub fn idle_for(&self) -> Duration {
        self.lock().last_activity.elapsed()
    }

    /// True when nothing is in flight and no activity has been observed for
    /// at least `quiet`.
    #[must_use]
    pub fn is_quiet(&self, quiet: Duration) -> bool {
        let state = self.lock();
        state.in_flight.is_empty() && state.last_activity.elapsed() >= quiet
    }

    /// Handle to the failed-request log.
    #[must_use]
    pub fn failures(&self) -> &EventLog<FailedRequest> {
        &self.failures
    }
}

impl Default for NetworkWatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> RequestId {
        RequestId::new(raw)
    }

    #[test]
    fn tracks_in_flight_requests() {
        let watch = NetworkWatch::new();
        assert_eq!(watch.in_flight(), 0);

        watch.request_started(id("1"), "http://localhost:8000/".into());
        watch.request_started(id("2"), "http://localhost:8000/app.js".into());
        assert_eq!(watch.in_flight(), 2);

        watch.request_finished(&id("1"));
        assert_eq!(watch.in_flight(), 1);

        watch.request_finished(&id("2"));
        assert_eq!(watch.in_flight(), 0);
    }

    #[test]
    fn failure_recovers_url_from_request_start() {
        let watch = NetworkWatch::new();

        watch.request_started(id("7"), "http://x/y.png".into());
        watch.request_failed(&id("7"), "net::ERR_FAILED");

        let failures = watch.failures().snapshot();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].url, "http://x/y.png");
        assert_eq!(failures[0].reason, "net::ERR_FAILED");
        // A failed request is no longer in flight.
        assert_eq!(watch.in_flight(), 0);
    }

    #[test]
    fn failure_without_observed_start_uses_placeholder() {
        let watch = NetworkWatch::new();

        watch.request_failed(&id("9"), "net::ERR_ABORTED");

        let failures = watch.failures().snapshot();
        assert_eq!(failures[0].url, UNKNOWN_URL);
    }

    #[test]
    fn failures_preserve_emission_order() {
        let watch = NetworkWatch::new();

        watch.request_started(id("1"), "http://a".into());
        watch.request_started(id("2"), "http://b".into());
        watch.request_failed(&id("1"), "net::ERR_FAILED");
        watch.request_failed(&id("2"), "net::ERR_TIMED_OUT");

        let failures = watch.failures().snapshot();
        assert_eq!(failures[0].url, "http://a");
        assert_eq!(failures[1].url, "http://b");
    }

    #[test]
    fn quiet_requires_empty_in_flight() {
        let watch = NetworkWatch::new();
        watch.request_started(id("1"), "http://a".into());

        // Still in flight: never quiet, regardless of elapsed time.
        assert!(!watch.is_quiet(Duration::ZERO));

        watch.request_finished(&id("1"));
        // Nothing in flight and zero quiet period: immediately quiet.
        assert!(watch.is_quiet(Duration::ZERO));
        // A long quiet period has not elapsed yet.
        assert!(!watch.is_quiet(Duration::from_secs(60)));
    }
}
