//! End-to-end scenario implementations
//!
//! Each scenario drives exactly one business flow, asserts one expected
//! outcome, and releases whatever session it acquired regardless of the
//! result. Assertion failures come back as `Fail` results; infrastructure
//! errors (transport, driver, unexpected timeouts) propagate as `Err` and
//! are converted to `Error` results by the runner.

mod api;
mod ui;

pub use api::{CreateDashboardMissingNameScenario, CreateDashboardScenario};
pub use ui::{CreateWidgetScenario, InvalidLoginScenario, ValidLoginScenario};

use anyhow::Result;

use crate::config::Settings;
use crate::models::{Scenario, ScenarioResult};

/// Run a single scenario by its catalog entry
pub async fn run_scenario(scenario: Scenario, settings: &Settings) -> Result<ScenarioResult> {
    match scenario {
        Scenario::CreateDashboard => CreateDashboardScenario::new(settings).run().await,
        Scenario::CreateDashboardMissingName => {
            CreateDashboardMissingNameScenario::new(settings).run().await
        }
        Scenario::ValidLogin => ValidLoginScenario::new(settings).run().await,
        Scenario::InvalidLogin => InvalidLoginScenario::new(settings).run().await,
        Scenario::CreateWidgetWithFilter => CreateWidgetScenario::new(settings).run().await,
    }
}
