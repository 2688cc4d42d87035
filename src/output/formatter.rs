//! Output formatters for scenario results
//!
//! Provides table, JSON, and summary output, plus the report file writer
//! used by `run --output`.

#![allow(dead_code)]

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

use crate::models::{ScenarioResult, ScenarioStatus, SuiteSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single scenario result
    pub fn format_result(&self, result: &ScenarioResult) -> String {
        match self.format {
            OutputFormat::Table | OutputFormat::Summary => self.format_result_row(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
        }
    }

    fn format_result_row(&self, result: &ScenarioResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                ScenarioStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                ScenarioStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                ScenarioStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                ScenarioStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match result.status {
                ScenarioStatus::Pass => "✓ PASS",
                ScenarioStatus::Fail => "✗ FAIL",
                ScenarioStatus::Skip => "○ SKIP",
                ScenarioStatus::Error => "! ERROR",
            }
        };

        let mut row = format!(
            "{:2}. [{:3}] {:30} {} [{:>6}ms]",
            result.scenario.number(),
            result.scenario.category(),
            result.scenario.name(),
            status_str,
            result.duration_ms
        );

        if let Some(msg) = &result.message {
            row.push_str(&format!("\n      {msg}"));
        }

        row
    }

    /// Format a full suite summary
    pub fn format_summary(&self, summary: &SuiteSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_line(summary),
        }
    }

    fn format_summary_table(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        output.push_str("\nScenario Results\n");
        output.push_str("──────────────────────────────────────────────────────────────────\n");

        for result in &summary.results {
            output.push_str(&self.format_result_row(result));
            output.push('\n');
        }

        output.push_str("──────────────────────────────────────────────────────────────────\n");
        output.push_str(&self.format_summary_line(summary));
        output.push('\n');

        output
    }

    fn format_summary_line(&self, summary: &SuiteSummary) -> String {
        format!(
            "Total: {}  Passed: {}  Failed: {}  Errors: {}  Skipped: {}  ({:.1}% pass, {}ms)",
            summary.total,
            summary.passed,
            summary.failed,
            summary.errors,
            summary.skipped,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }

    /// Write the suite summary as a JSON report
    pub fn write_report(&self, summary: &SuiteSummary, path: impl AsRef<Path>) -> Result<()> {
        let report = json!({
            "generated_at": Utc::now().to_rfc3339(),
            "summary": summary,
        });

        let content =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write report to {}", path.as_ref().display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;

    fn summary() -> SuiteSummary {
        SuiteSummary::new(vec![
            ScenarioResult::pass(Scenario::CreateDashboard, 120),
            ScenarioResult::fail(Scenario::ValidLogin, 340, "marker not reached"),
        ])
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table"), Some(OutputFormat::Table));
        assert_eq!(
            OutputFormat::from_str("JSON-Pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_format_result_row_without_color() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let row = formatter.format_result(&ScenarioResult::pass(Scenario::CreateDashboard, 55));

        assert!(row.contains("✓ PASS"));
        assert!(row.contains("Create Dashboard"));
        assert!(row.contains("[API]"));
        assert!(!row.contains("\x1b["));
    }

    #[test]
    fn test_format_summary_table_includes_failure_message() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_summary(&summary());

        assert!(output.contains("marker not reached"));
        assert!(output.contains("Total: 2  Passed: 1  Failed: 1"));
    }

    #[test]
    fn test_format_summary_json_round_trips() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&summary());

        let parsed: SuiteSummary = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.passed, 1);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let formatter = ResultFormatter::new(OutputFormat::Table);
        formatter.write_report(&summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["summary"]["total"], 2);
    }
}
