//! Scenario execution engine
//!
//! Strictly sequential: one scenario at a time, in catalog order.

mod runner;

pub use runner::ScenarioRunner;
