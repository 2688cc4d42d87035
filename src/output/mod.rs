//! Output formatting module
//!
//! Console formats for scenario results and the JSON report file.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
