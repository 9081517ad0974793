//! The smoke check: one observation pass against a single target.
//!
//! Strictly linear: launch, open an observed page, navigate until the
//! network is idle, hold a fixed settle delay, drain the records, release
//! the browser. Records captured before a failure are discarded; the caller
//! prints a report only for a pass that completed.

use crate::cli::Cli;
use crate::error::Result;
use crate::report::CheckReport;
use smoke_browser::{BrowserOptions, HeadlessBrowser, Page, WaitConfig};
use std::time::Duration;
use tracing::{debug, info};

/// Deadline for navigation plus network idle.
const NAV_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed hold after the network settles, so asynchronous scripts get a
/// window to finish emitting events. Long enough to catch most deferred
/// errors, short enough to keep the check fast.
const SETTLE_DELAY: Duration = Duration::from_millis(2_500);

/// Runs the observation pass and returns the drained records.
///
/// The browser process is released on every exit path: explicitly after the
/// pass, or through Drop if this function unwinds before closing.
///
/// # Errors
///
/// Any launch, navigation, wait, or teardown failure surfaces as a
/// [`CliError`](crate::error::CliError); there is no retry and no partial
/// report.
pub async fn execute(args: &Cli) -> Result<CheckReport> {
    let mut options = BrowserOptions::new();
    if args.headful {
        options = options.headful();
    }
    if let Some(path) = &args.chrome {
        options = options.with_chrome_path(path);
    }

    let browser = HeadlessBrowser::launch(options).await?;

    let outcome = observe(&browser, &args.target).await;

    // Release the browser before surfacing whatever the pass produced.
    let closed = browser.close().await;
    let report = outcome?;
    closed?;

    Ok(report)
}

/// One pass: navigate, wait, settle, drain.
async fn observe(browser: &HeadlessBrowser, target: &str) -> Result<CheckReport> {
    let page = browser.new_page().await?;

    info!(url = %target, "navigating");
    page.navigate(target).await?;
    page.wait_until_network_idle(WaitConfig::with_timeout(NAV_TIMEOUT))
        .await?;

    debug!(delay_ms = SETTLE_DELAY.as_millis() as u64, "settling");
    page.settle(SETTLE_DELAY).await;

    let report = drain(&page);
    debug!(
        console = report.console.len(),
        page_errors = report.page_errors.len(),
        failed_requests = report.failed_requests.len(),
        "observation complete"
    );

    page.close().await?;
    Ok(report)
}

/// Snapshots the three logs. The observation window is over by the time
/// this runs, so the records are final.
fn drain(page: &Page) -> CheckReport {
    CheckReport {
        console: page.console().snapshot(),
        page_errors: page.page_errors().snapshot(),
        failed_requests: page.failed_requests().snapshot(),
    }
}
