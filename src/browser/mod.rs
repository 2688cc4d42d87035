//! Browser automation layer
//!
//! Drives a headless browser through a long-lived Playwright driver process.
//! The crate stages a small Node driver script into a temp directory, spawns
//! it with `node`, and exchanges line-delimited JSON commands over
//! stdin/stdout. [`session::BrowserSession`] is the per-scenario handle the
//! page abstractions are built on.

mod driver;
mod session;

pub use session::BrowserSession;
