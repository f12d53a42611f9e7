use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for launching a new Chrome/Chromium instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    pub window_width: u32,

    pub window_height: u32,

    /// Chrome binary to use instead of the auto-detected one
    pub chrome_path: Option<PathBuf>,

    /// Profile directory; a temporary one is used when unset
    pub user_data_dir: Option<PathBuf>,

    pub sandbox: bool,

    /// Seconds of inactivity after which the browser connection is dropped
    pub idle_timeout_secs: u64,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
            idle_timeout_secs: 60 * 60,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set user data directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Builder method: set idle timeout
    pub fn idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// Options for attaching to an already running browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// DevTools WebSocket URL, e.g. `ws://127.0.0.1:9222/devtools/browser/<id>`
    pub ws_url: String,

    /// Milliseconds without DevTools traffic after which the connection is dropped
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30_000
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            timeout: default_timeout(),
        }
    }

    /// Builder method: set timeout in milliseconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_defaults() {
        let opts = LaunchOptions::default();

        assert!(opts.headless);
        assert!(opts.sandbox);
        assert_eq!(opts.idle_timeout_secs, 3600);
        assert!(opts.chrome_path.is_none());
    }

    #[test]
    fn test_launch_options_from_partial_json() {
        let opts: LaunchOptions = serde_json::from_value(serde_json::json!({
            "headless": false,
            "window_width": 1024
        }))
        .unwrap();

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 1024);
        assert_eq!(opts.window_height, 800);
    }

    #[test]
    fn test_connection_options_default_timeout() {
        let opts: ConnectionOptions =
            serde_json::from_str(r#"{"ws_url": "ws://localhost:9222/devtools/browser/abc"}"#).unwrap();

        assert_eq!(opts.timeout, 30_000);
    }
}
