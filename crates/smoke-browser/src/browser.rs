//! Browser lifecycle management.
//!
//! `HeadlessBrowser` owns exactly one Chrome process for the duration of a
//! smoke check. The process is released on every exit path: explicitly via
//! `close()`, or by chromiumoxide's Drop when the run unwinds early.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Launch options for the smoke-check browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run without a visible window (default: true).
    pub headless: bool,

    /// Browser window size (default: 1280x720).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<String>,
}

impl BrowserOptions {
    /// Creates options with headless defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs with a visible window, for watching a check by eye.
    #[must_use]
    pub fn headful(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Uses a specific Chrome executable instead of auto-detection.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<String>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Converts to a chromiumoxide `BrowserConfig`.
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        } else {
            config = config.with_head();
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // Unique user data directory so a check never trips over another
        // Chrome instance's ProcessSingleton lock.
        let user_data_dir = std::env::temp_dir().join(format!("smoke-{}", uuid::Uuid::new_v4()));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1280, 720),
            args: vec![
                // Required where user namespaces are unavailable (containers, CI).
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments.
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed headless Chrome instance.
///
/// The browser process is exclusively owned by one smoke-check run; it is
/// never pooled or reused. Prefer explicit `close()` at the end of the run;
/// Drop covers panics and early returns by letting chromiumoxide kill the
/// process.
pub struct HeadlessBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
}

impl HeadlessBrowser {
    /// Spawns a Chrome process and establishes the CDP connection.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::LaunchFailed`] if Chrome is not installed,
    /// not executable, or fails to start.
    pub async fn launch(options: BrowserOptions) -> Result<Self> {
        debug!(?options, "launching browser");

        let browser_config = options.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the CDP connection; chromiumoxide processes no events
        // without this task.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {}", e);
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Opens a new page (tab) with smoke-check observers attached.
    ///
    /// The returned [`Page`] has its console, page-error, and network
    /// observers registered before this method returns, so navigation can
    /// begin without missing early events.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::AlreadyClosed`] if the browser has been
    /// closed, or a protocol error if the tab cannot be created.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;
        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser.new_page("about:blank").await?;

        Page::attach(chrome_page).await
    }

    /// Closes the browser and kills the Chrome process.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;

        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser.close().await?;
        }

        Ok(())
    }

    /// Returns true once the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for HeadlessBrowser {
    fn drop(&mut self) {
        // chromiumoxide's Browser::drop kills the process if close() was
        // never reached, so nothing leaks on panic or early return.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("HeadlessBrowser dropped without explicit close() - forcing shutdown");
            }
        }
    }
}
