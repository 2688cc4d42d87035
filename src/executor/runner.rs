//! Scenario runner
//!
//! Runs scenarios in order, one at a time. Scenario errors are converted
//! into `Error` results so one broken scenario never stops the rest of the
//! suite; nothing is retried.

use tracing::{error, info};

use crate::config::Settings;
use crate::models::{Scenario, ScenarioResult, SuiteSummary};
use crate::scenarios;
use crate::utils::timer::Timer;

pub struct ScenarioRunner<'a> {
    settings: &'a Settings,
    skip: Vec<u8>,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            skip: Vec::new(),
        }
    }

    /// Scenario numbers to skip
    pub fn with_skip(mut self, skip: Vec<u8>) -> Self {
        self.skip = skip;
        self
    }

    /// Run a single scenario
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioResult {
        if self.skip.contains(&scenario.number()) {
            return ScenarioResult::skip(scenario, "Skipped by configuration");
        }

        match scenarios::run_scenario(scenario, self.settings).await {
            Ok(result) => result,
            Err(e) => {
                error!("{} failed with error: {e:#}", scenario);
                ScenarioResult::error(scenario, format!("{e:#}"))
            }
        }
    }

    /// Run every scenario in the catalog, in order
    pub async fn run_all(&self) -> SuiteSummary {
        self.run_list(Scenario::all()).await
    }

    /// Run all scenarios in one suite ("API" or "UI")
    pub async fn run_suite(&self, category: &str) -> SuiteSummary {
        let scenarios = Scenario::all()
            .into_iter()
            .filter(|s| s.category().eq_ignore_ascii_case(category))
            .collect();
        self.run_list(scenarios).await
    }

    async fn run_list(&self, scenarios: Vec<Scenario>) -> SuiteSummary {
        info!("Starting run: {} scenario(s)", scenarios.len());
        let timer = Timer::start("suite run");

        let mut results = Vec::new();
        for scenario in scenarios {
            let result = self.run_scenario(scenario).await;
            info!("  {result}");
            results.push(result);
        }

        let summary = SuiteSummary::new(results);
        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            timer.finish(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}
