//! API scenarios for dashboard management

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::api::ApiError;
use crate::config::Settings;
use crate::models::{Scenario, ScenarioResult};
use crate::steps::{count_matching, DashboardApiSteps};
use crate::utils::timer::Timer;

/// Unique dashboard name for one run
fn auto_dashboard_name() -> String {
    format!("AutoDashboard_{}", Utc::now().timestamp_millis())
}

/// Whether the error is an expectation miss (wrong status code) rather
/// than a transport or protocol failure
fn status_mismatch(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<ApiError>()
        .filter(|e| matches!(e, ApiError::UnexpectedStatus { .. }))
        .map(|e| e.to_string())
}

/// Scenario 1: create a dashboard and verify it appears exactly once
pub struct CreateDashboardScenario<'a> {
    settings: &'a Settings,
}

impl<'a> CreateDashboardScenario<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::CreateDashboard);
        let timer = Timer::start("create dashboard scenario");

        let steps = DashboardApiSteps::from_settings(self.settings)?;
        let name = auto_dashboard_name();

        if let Err(e) = steps.create_dashboard(&name).await {
            if let Some(mismatch) = status_mismatch(&e) {
                return Ok(ScenarioResult::fail(
                    Scenario::CreateDashboard,
                    timer.elapsed_ms(),
                    mismatch,
                ));
            }
            return Err(e);
        }

        let count = steps.count_named(&name).await?;
        let duration_ms = timer.elapsed_ms();

        if count == 1 {
            Ok(ScenarioResult::pass(Scenario::CreateDashboard, duration_ms)
                .with_details(json!({ "name": name })))
        } else {
            Ok(ScenarioResult::fail(
                Scenario::CreateDashboard,
                duration_ms,
                format!("Expected exactly one dashboard named '{name}', found {count}"),
            ))
        }
    }
}

/// Scenario 2 (negative): a create without the required name must be
/// rejected and must leave the collection unchanged
pub struct CreateDashboardMissingNameScenario<'a> {
    settings: &'a Settings,
}

impl<'a> CreateDashboardMissingNameScenario<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<ScenarioResult> {
        info!("Running {}", Scenario::CreateDashboardMissingName);
        let timer = Timer::start("create dashboard negative scenario");

        let steps = DashboardApiSteps::from_settings(self.settings)?;
        let before = steps.fetch_dashboards().await?;

        if let Err(e) = steps.create_dashboard_missing_name().await {
            if let Some(mismatch) = status_mismatch(&e) {
                return Ok(ScenarioResult::fail(
                    Scenario::CreateDashboardMissingName,
                    timer.elapsed_ms(),
                    mismatch,
                ));
            }
            return Err(e);
        }

        let after = steps.fetch_dashboards().await?;
        let duration_ms = timer.elapsed_ms();

        if after.len() != before.len() {
            return Ok(ScenarioResult::fail(
                Scenario::CreateDashboardMissingName,
                duration_ms,
                format!(
                    "Dashboard count changed after rejected create: {} -> {}",
                    before.len(),
                    after.len()
                ),
            ));
        }

        let empty_named = count_matching(&after, "");
        if empty_named != 0 {
            return Ok(ScenarioResult::fail(
                Scenario::CreateDashboardMissingName,
                duration_ms,
                format!("Found {empty_named} dashboard(s) with an empty name"),
            ));
        }

        Ok(
            ScenarioResult::pass(Scenario::CreateDashboardMissingName, duration_ms)
                .with_details(json!({ "dashboards": after.len() })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_dashboard_name_shape() {
        let name = auto_dashboard_name();
        let suffix = name.strip_prefix("AutoDashboard_").unwrap();
        assert!(suffix.parse::<i64>().is_ok());
    }

    #[test]
    fn test_status_mismatch_detection() {
        let err: anyhow::Error = ApiError::UnexpectedStatus {
            expected: 400,
            actual: 201,
            body: "{}".to_string(),
        }
        .into();
        assert!(status_mismatch(&err).unwrap().contains("Expected HTTP 400"));

        let err = anyhow::anyhow!("connection refused");
        assert!(status_mismatch(&err).is_none());

        let err: anyhow::Error = ApiError::MalformedResponse("not json".to_string()).into();
        assert!(status_mismatch(&err).is_none());
    }
}
