//! Dashboard REST action layer
//!
//! Typed operations over the product's dashboard endpoints.

mod dashboard;

pub use dashboard::{ApiError, Dashboard, DashboardApi};
