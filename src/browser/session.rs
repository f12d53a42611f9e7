use crate::{browser::{chrome::ChromeDriver,
                      config::{ConnectionOptions, LaunchOptions}},
            error::{BrowserError, Result},
            selection::Selection};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that owns a Chrome/Chromium instance and the driver for its working tab
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Driver bound to the tab selections are resolved against
    driver: ChromeDriver,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = Duration::from_secs(options.idle_timeout_secs);
        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        log::debug!(
            "Launching browser (headless: {}, window: {}x{})",
            options.headless,
            options.window_width,
            options.window_height
        );
        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, driver: ChromeDriver::new(tab) })
    }

    /// Connect to an existing browser instance via WebSocket, driving its first open tab
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        log::debug!("Connecting to browser at {}", options.ws_url);
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        let existing = browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .first()
            .cloned();

        let tab = match existing {
            Some(tab) => tab,
            None => browser
                .new_tab()
                .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to create tab: {}", e)))?,
        };

        Ok(Self { browser, driver: ChromeDriver::new(tab) })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Start a selection rooted at `selector` in the session's tab
    pub fn find(&self, selector: impl Into<String>) -> Selection<'_, ChromeDriver> {
        Selection::new(&self.driver, selector)
    }

    /// The driver bound to the session's tab
    pub fn driver(&self) -> &ChromeDriver {
        &self.driver
    }

    pub fn tab(&self) -> &Arc<Tab> {
        self.driver.tab()
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL and wait for the page to load
    pub fn navigate(&self, url: &str) -> Result<()> {
        log::debug!("Navigating to {}", url);
        self.tab()
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Close the session's tab; the browser process exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        self.tab()
            .close(true)
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(true).window_size(800, 600);

        assert!(opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.timeout, 5000);
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_find_on_blank_page() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        session.navigate("about:blank").expect("Failed to navigate");

        let count = session.find("body").find("button").count().expect("Failed to count");
        assert_eq!(count, 0);
    }
}
