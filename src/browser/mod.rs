//! Chrome/Chromium backend
//!
//! [`ChromeDriver`] implements the [`Driver`](crate::driver::Driver) boundary over the
//! Chrome DevTools Protocol; [`BrowserSession`] launches or attaches to a browser and
//! hands out selections rooted in its tab.

pub mod chrome;
pub mod config;
pub mod session;

pub use chrome::{ChromeDriver, ChromeElement};
pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
