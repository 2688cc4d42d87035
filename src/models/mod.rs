//! Data models
//!
//! The scenario catalog and the result types produced by a run.

mod result;

pub use result::{Scenario, ScenarioResult, ScenarioStatus, SuiteSummary};
