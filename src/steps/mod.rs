//! Step layer
//!
//! Fluent wrappers over the page abstractions and the REST action layer.
//! Each step performs one operation and logs one reportable line; chainable
//! steps hand back the same step object so multi-step flows read as a
//! pipeline. Composition order inside the composites is fixed business
//! logic and is never reordered.

mod dashboard_api;
mod login;
mod widget;

pub use dashboard_api::{count_matching, DashboardApiSteps};
pub use login::LoginSteps;
pub use widget::WidgetSteps;
