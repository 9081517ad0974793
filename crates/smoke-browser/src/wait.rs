//! Poll-based wait strategies.
//!
//! A smoke check has two bounded waits: document readiness after navigation
//! and network idleness before the report. Both are expressed as a condition
//! polled at a fixed interval under a deadline.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default deadline for navigation-related waits (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet period for the network-idle heuristic (500ms).
///
/// The network is judged idle once nothing is in flight and no request
/// activity has been observed for this long.
pub const NETWORK_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Timeout and poll interval for a wait operation.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,
    /// How often to re-check the condition.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Custom timeout with the default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `condition` until it reports true or the deadline passes.
///
/// A condition returning `Err` is treated the same as "not yet": evaluation
/// errors during page load (e.g. a script probe racing a navigation) are
/// transient, and the deadline still bounds the overall wait.
///
/// # Errors
///
/// Returns [`BrowserError::WaitTimeout`] when the deadline passes without
/// the condition becoming true.
pub async fn poll_until<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        if let Ok(true) = condition().await {
            return Ok(());
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_immediately() {
        let result = poll_until(|| async { Ok(true) }, WaitConfig::default(), "instant").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn succeeds_after_several_polls() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_condition = calls.clone();

        let result = poll_until(
            move || {
                let calls = calls_in_condition.clone();
                async move { Ok(calls.fetch_add(1, Ordering::SeqCst) >= 3) }
            },
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(10)),
            "fourth poll",
        )
        .await;

        assert!(result.is_ok());
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn times_out_on_never_true() {
        let result = poll_until(
            || async { Ok(false) },
            WaitConfig::new(Duration::from_millis(50), Duration::from_millis(10)),
            "never",
        )
        .await;

        assert!(matches!(result, Err(BrowserError::WaitTimeout { .. })));
    }

    #[tokio::test]
    async fn transient_errors_keep_polling() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_condition = calls.clone();

        let result = poll_until(
            move || {
                let calls = calls_in_condition.clone();
                async move {
                    // Fail the first two probes, then succeed.
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BrowserError::ScriptFailed("transient".into()))
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(10)),
            "after transient errors",
        )
        .await;

        assert!(result.is_ok());
    }
}
