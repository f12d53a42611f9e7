//! # browser-selection
//!
//! Chainable, lazily-resolved element selections for browser automation.
//!
//! ## Features
//!
//! - **Selection chaining**: Build descendant selector paths with [`Selection::find`] without touching the page
//! - **Live resolution**: Every operation re-queries the current document; nothing is cached
//! - **Strict targeting**: Single-element operations refuse to act when a path matches zero or several elements
//! - **Diagnosable errors**: Every [`SelectionError`] names the selector path that failed
//! - **Pluggable backends**: Selections only depend on the [`Driver`] and [`Element`] traits;
//!   a Chrome DevTools Protocol backend is included
//!
//! ## Usage
//!
//! ```rust,no_run
//! use browser_selection::{BrowserSession, LaunchOptions};
//!
//! # fn main() -> browser_selection::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com/login")?;
//!
//! let form = session.find("form#login");
//! form.find("input[name=user]").fill("alice")?;
//! form.find("input[name=password]").fill("hunter2")?;
//! form.find("input[name=remember]").check()?;
//! form.find("select#lang").select("English")?;
//! form.submit()?;
//!
//! println!("{} errors shown", session.find(".error").count()?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom Drivers
//!
//! Any backend able to resolve CSS selectors can implement [`Driver`]; selections are then
//! created with [`Selection::new`]:
//!
//! ```rust,ignore
//! let selection = Selection::new(&my_driver, "ul.results").find("li");
//! let hits = selection.count()?;
//! ```
//!
//! ## Module Overview
//!
//! - [`selection`]: The chainable [`Selection`] and its operations
//! - [`driver`]: The [`Driver`] / [`Element`] boundary selections resolve through
//! - [`browser`]: Chrome backend, launch/connection options and browser sessions
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod driver;
pub mod error;
pub mod selection;

pub use browser::{BrowserSession, ChromeDriver, ChromeElement, ConnectionOptions, LaunchOptions};
pub use driver::{Driver, Element, Point};
pub use error::{BrowserError, DriverError, Operation, Result, SelectionError, SelectionResult};
pub use selection::Selection;
