//! Scenario catalog and result models

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five end-to-end scenarios in the suite
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // API scenarios (1-2)
    CreateDashboard,
    CreateDashboardMissingName,

    // UI scenarios (3-5)
    ValidLogin,
    InvalidLogin,
    CreateWidgetWithFilter,
}

impl Scenario {
    /// Scenario number (1-5)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::CreateDashboard => 1,
            Scenario::CreateDashboardMissingName => 2,
            Scenario::ValidLogin => 3,
            Scenario::InvalidLogin => 4,
            Scenario::CreateWidgetWithFilter => 5,
        }
    }

    /// Scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CreateDashboard => "Create Dashboard",
            Scenario::CreateDashboardMissingName => "Create Dashboard Without Name",
            Scenario::ValidLogin => "Valid Login",
            Scenario::InvalidLogin => "Invalid Login",
            Scenario::CreateWidgetWithFilter => "Create Widget With Filter",
        }
    }

    /// Suite the scenario belongs to
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::CreateDashboard | Scenario::CreateDashboardMissingName => "API",
            _ => "UI",
        }
    }

    /// Whether this is a negative scenario (expects rejection)
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Scenario::CreateDashboardMissingName | Scenario::InvalidLogin
        )
    }

    /// All scenarios in execution order
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::CreateDashboard,
            Scenario::CreateDashboardMissingName,
            Scenario::ValidLogin,
            Scenario::InvalidLogin,
            Scenario::CreateWidgetWithFilter,
        ]
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        match n {
            1 => Some(Scenario::CreateDashboard),
            2 => Some(Scenario::CreateDashboardMissingName),
            3 => Some(Scenario::ValidLogin),
            4 => Some(Scenario::InvalidLogin),
            5 => Some(Scenario::CreateWidgetWithFilter),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl ScenarioStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ScenarioStatus::Pass => "✓",
            ScenarioStatus::Fail => "✗",
            ScenarioStatus::Skip => "○",
            ScenarioStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioStatus::Pass)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStatus::Pass => write!(f, "PASS"),
            ScenarioStatus::Fail => write!(f, "FAIL"),
            ScenarioStatus::Skip => write!(f, "SKIP"),
            ScenarioStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ScenarioResult {
    pub fn pass(scenario: Scenario, duration_ms: u64) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Pass,
            duration_ms,
            message: None,
            details: None,
        }
    }

    pub fn fail(scenario: Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Fail,
            duration_ms,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn skip(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Skip,
            duration_ms: 0,
            message: Some(reason.into()),
            details: None,
        }
    }

    pub fn error(scenario: Scenario, error: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.scenario,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of a suite run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteSummary {
    pub fn new(results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Fail)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Skip)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            total,
            passed,
            failed,
            skipped,
            errors,
            total_duration_ms,
            results,
        }
    }

    /// Pass rate as a percentage of executed (non-skipped) scenarios
    pub fn pass_rate(&self) -> f64 {
        let executed = self.total - self.skipped;
        if executed == 0 {
            0.0
        } else {
            (self.passed as f64 / executed as f64) * 100.0
        }
    }

    /// Whether every non-skipped scenario passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_catalog_is_consistent() {
        let all = Scenario::all();
        assert_eq!(all.len(), 5);

        for (idx, scenario) in all.iter().enumerate() {
            assert_eq!(scenario.number() as usize, idx + 1);
            assert_eq!(Scenario::from_number(scenario.number()), Some(*scenario));
        }
        assert_eq!(Scenario::from_number(0), None);
        assert_eq!(Scenario::from_number(6), None);
    }

    #[test]
    fn test_scenario_categories() {
        assert_eq!(Scenario::CreateDashboard.category(), "API");
        assert_eq!(Scenario::CreateDashboardMissingName.category(), "API");
        assert_eq!(Scenario::ValidLogin.category(), "UI");
        assert_eq!(Scenario::CreateWidgetWithFilter.category(), "UI");
    }

    #[test]
    fn test_negative_scenarios() {
        assert!(Scenario::CreateDashboardMissingName.is_negative());
        assert!(Scenario::InvalidLogin.is_negative());
        assert!(!Scenario::CreateDashboard.is_negative());
    }

    #[test]
    fn test_result_constructors() {
        let pass = ScenarioResult::pass(Scenario::ValidLogin, 1200);
        assert!(pass.status.is_success());
        assert!(pass.message.is_none());

        let fail = ScenarioResult::fail(Scenario::ValidLogin, 800, "marker not reached");
        assert_eq!(fail.status, ScenarioStatus::Fail);
        assert_eq!(fail.message.as_deref(), Some("marker not reached"));

        let skip = ScenarioResult::skip(Scenario::InvalidLogin, "skipped by flag");
        assert_eq!(skip.duration_ms, 0);
    }

    #[test]
    fn test_suite_summary_counts() {
        let results = vec![
            ScenarioResult::pass(Scenario::CreateDashboard, 100),
            ScenarioResult::fail(Scenario::ValidLogin, 200, "nope"),
            ScenarioResult::skip(Scenario::InvalidLogin, "skipped"),
            ScenarioResult::error(Scenario::CreateWidgetWithFilter, "driver died"),
        ];

        let summary = SuiteSummary::new(results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_duration_ms, 300);
        assert!(!summary.all_passed());
        // 1 of 3 executed
        assert!((summary.pass_rate() - 33.33).abs() < 0.1);
    }

    #[test]
    fn test_result_display() {
        let result = ScenarioResult::fail(Scenario::CreateDashboard, 42, "missing from list");
        let line = result.to_string();
        assert!(line.contains("Scenario 1"));
        assert!(line.contains("42ms"));
        assert!(line.contains("missing from list"));
    }
}
