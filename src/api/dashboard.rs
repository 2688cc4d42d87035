//! Dashboard endpoint operations
//!
//! Each operation issues exactly one request and accepts exactly one status
//! code; anything else is a hard failure of the calling scenario. Duplicate
//! creates produce duplicate remote dashboards: the API has no idempotency.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;
use crate::http::{HttpClient, HttpResponse};

/// Dashboard API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Expected HTTP {expected} but got {actual}: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Malformed dashboard list response: {0}")]
    MalformedResponse(String),
}

/// A dashboard record as observed through the list endpoint. Identity is the
/// `name` field within a project's collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub share: bool,
}

#[derive(Debug, Deserialize)]
struct DashboardList {
    #[serde(default)]
    content: Vec<Dashboard>,
}

/// Client for the dashboard endpoints of one project
#[derive(Clone)]
pub struct DashboardApi {
    client: HttpClient,
    project: String,
}

impl DashboardApi {
    /// Build the API client from suite settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = HttpClient::with_timeout(settings.http_timeout().as_secs())?
            .base_url(settings.base_api_url())
            .bearer_token(settings.api_token())?;

        Ok(Self {
            client,
            project: settings.project_name().to_string(),
        })
    }

    fn dashboard_path(&self) -> String {
        format!("/v1/{}/dashboard", self.project)
    }

    /// Create a dashboard. Succeeds only on HTTP 201.
    pub async fn create_dashboard(&self, name: &str) -> Result<()> {
        let body = json!({
            "name": name,
            "description": "Created via API",
            "share": false,
        });

        let response = self
            .client
            .post_json(&self.dashboard_path(), &body)
            .await
            .context("Dashboard create request failed")?;

        expect_status(&response, 201)?;
        debug!("Created dashboard '{}'", name);
        Ok(())
    }

    /// Attempt a create with the required `name` field omitted. This is a
    /// negative-path probe: it succeeds only when the API rejects the
    /// request with HTTP 400.
    pub async fn create_dashboard_missing_name(&self) -> Result<()> {
        let body = json!({
            "description": "Missing name",
            "share": false,
        });

        let response = self
            .client
            .post_json(&self.dashboard_path(), &body)
            .await
            .context("Dashboard create request failed")?;

        expect_status(&response, 400)?;
        debug!("Create without name was rejected as expected");
        Ok(())
    }

    /// Fetch the current dashboard collection. A live snapshot: no caching,
    /// no pagination beyond the first response page.
    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>> {
        let response = self
            .client
            .get(&self.dashboard_path())
            .await
            .context("Dashboard list request failed")?;

        expect_status(&response, 200)?;
        parse_dashboard_list(&response.body)
    }
}

fn expect_status(response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status_code != expected {
        return Err(ApiError::UnexpectedStatus {
            expected,
            actual: response.status_code,
            body: response.body.chars().take(200).collect(),
        }
        .into());
    }
    Ok(())
}

fn parse_dashboard_list(body: &str) -> Result<Vec<Dashboard>> {
    let list: DashboardList = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
    Ok(list.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: HashMap::new(),
            body: body.to_string(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_expect_status_match() {
        assert!(expect_status(&response(201, ""), 201).is_ok());
    }

    #[test]
    fn test_expect_status_mismatch() {
        let err = expect_status(&response(409, "conflict"), 201).unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(
            api_err,
            ApiError::UnexpectedStatus {
                expected: 201,
                actual: 409,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_dashboard_list() {
        let body = r#"{
            "content": [
                {"name": "AutoDashboard_1", "description": "Created via API", "share": false},
                {"name": "Main", "description": "", "share": true, "owner": "default"}
            ],
            "page": {"number": 1, "size": 20}
        }"#;

        let dashboards = parse_dashboard_list(body).unwrap();
        assert_eq!(dashboards.len(), 2);
        assert_eq!(dashboards[0].name, "AutoDashboard_1");
        assert!(dashboards[1].share);
    }

    #[test]
    fn test_parse_dashboard_list_empty_content() {
        let dashboards = parse_dashboard_list(r#"{"content": []}"#).unwrap();
        assert!(dashboards.is_empty());

        // A body without the content field is treated as an empty collection
        let dashboards = parse_dashboard_list("{}").unwrap();
        assert!(dashboards.is_empty());
    }

    #[test]
    fn test_parse_dashboard_list_malformed() {
        let err = parse_dashboard_list("not json").unwrap_err();
        assert!(err.downcast_ref::<ApiError>().is_some());
    }
}
