//! Dashboard API steps
//!
//! Reportable wrappers over [`DashboardApi`]. The queries return data; the
//! calling scenario owns the assertion so that an unmet expectation is a
//! scenario failure, not an infrastructure error.

use anyhow::Result;
use tracing::info;

use crate::api::{Dashboard, DashboardApi};
use crate::config::Settings;

pub struct DashboardApiSteps {
    api: DashboardApi,
}

impl DashboardApiSteps {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            api: DashboardApi::from_settings(settings)?,
        })
    }

    /// Create a dashboard, expecting HTTP 201
    pub async fn create_dashboard(&self, name: &str) -> Result<()> {
        info!("Step: create dashboard '{name}'");
        self.api.create_dashboard(name).await
    }

    /// Attempt a create without the required name, expecting HTTP 400
    pub async fn create_dashboard_missing_name(&self) -> Result<()> {
        info!("Step: create dashboard without required name");
        self.api.create_dashboard_missing_name().await
    }

    /// Fetch the current dashboard collection
    pub async fn fetch_dashboards(&self) -> Result<Vec<Dashboard>> {
        info!("Step: fetch dashboard list");
        self.api.list_dashboards().await
    }

    /// How many dashboards currently carry this exact name
    pub async fn count_named(&self, name: &str) -> Result<usize> {
        let dashboards = self.fetch_dashboards().await?;
        Ok(count_matching(&dashboards, name))
    }
}

/// Exact-name match count within a fetched collection
pub fn count_matching(dashboards: &[Dashboard], name: &str) -> usize {
    dashboards.iter().filter(|d| d.name == name).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(name: &str) -> Dashboard {
        Dashboard {
            name: name.to_string(),
            description: String::new(),
            share: false,
        }
    }

    #[test]
    fn test_count_matching_exact_once() {
        let dashboards = vec![
            dashboard("AutoDashboard_1"),
            dashboard("AutoDashboard_10"),
            dashboard("Main"),
        ];

        assert_eq!(count_matching(&dashboards, "AutoDashboard_1"), 1);
        assert_eq!(count_matching(&dashboards, "AutoDashboard_10"), 1);
    }

    #[test]
    fn test_count_matching_duplicates() {
        // Creates are not idempotent: the same name can appear twice
        let dashboards = vec![dashboard("dup"), dashboard("dup")];
        assert_eq!(count_matching(&dashboards, "dup"), 2);
    }

    #[test]
    fn test_count_matching_absent_and_empty() {
        let dashboards = vec![dashboard("present")];
        assert_eq!(count_matching(&dashboards, "absent"), 0);
        assert_eq!(count_matching(&dashboards, ""), 0);
    }
}
