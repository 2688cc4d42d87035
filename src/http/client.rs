//! HTTP client for the dashboard REST API
//!
//! Provides a high-level HTTP client for driving the product's REST surface.
//! There are no retries and no idempotency keys: re-invoking an operation
//! issues a fresh request.

#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client with a fixed base URL and default headers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Option<String>,
    default_headers: HeaderMap,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout_secs,
        })
    }

    /// Set the base URL for requests
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add a default header sent with every request
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("Invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("Invalid header value")?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Attach a bearer token as the default Authorization header
    pub fn bearer_token(self, token: impl AsRef<str>) -> Result<Self> {
        self.default_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Build the full URL
    fn build_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path.to_string()
                } else {
                    format!("{}{}", base.trim_end_matches('/'), path)
                }
            }
            None => path.to_string(),
        }
    }

    /// Send an HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.build_url(&request.url);
        debug!("Sending {} request to {}", request.method, url);

        let method =
            Method::from_bytes(request.method.as_bytes()).context("Invalid HTTP method")?;

        let mut req_builder = self.client.request(method, &url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = std::time::Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(self.timeout_secs))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionRefused(url.clone()))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();
        let headers = response.headers().clone();

        let mut response_headers = HashMap::new();
        for (key, value) in headers.iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body,
            duration_ms,
        })
    }

    /// Convenience method for a GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.send(HttpRequest::get(url)).await
    }

    /// Convenience method for a POST request with a JSON body
    pub async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse> {
        self.send(HttpRequest::post(url).json(body)?).await
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and the matching Content-Type header
    pub fn json(self, value: &serde_json::Value) -> Result<Self> {
        let body = serde_json::to_string(value).context("Failed to serialize JSON body")?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Deserialize the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .with_context(|| format!("Failed to parse response body: {}", truncate(&self.body)))
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::get("/v1/demo/dashboard")
            .header("Authorization", "Bearer token")
            .header("X-Custom", "value");

        assert_eq!(req.method, "GET");
        assert_eq!(req.headers.len(), 2);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_http_request_json_body() {
        let req = HttpRequest::post("/v1/demo/dashboard")
            .json(&serde_json::json!({"name": "dash", "share": false}))
            .unwrap();

        assert_eq!(req.headers["Content-Type"], "application/json");
        let body = req.body.unwrap();
        assert!(body.contains("\"name\":\"dash\""));
    }

    #[test]
    fn test_build_url_joins_base() {
        let client = HttpClient::new().unwrap().base_url("http://rp.local:8080/api/");
        assert_eq!(
            client.build_url("/v1/demo/dashboard"),
            "http://rp.local:8080/api/v1/demo/dashboard"
        );
        // Absolute URLs pass through untouched
        assert_eq!(
            client.build_url("http://other.local/x"),
            "http://other.local/x"
        );
    }

    #[test]
    fn test_http_response_classification() {
        let resp = HttpResponse {
            status_code: 201,
            headers: HashMap::new(),
            body: String::new(),
            duration_ms: 12,
        };
        assert!(resp.is_success());
        assert!(!resp.is_client_error());

        let resp = HttpResponse {
            status_code: 400,
            ..resp
        };
        assert!(resp.is_client_error());
    }

    #[test]
    fn test_http_response_json() {
        let resp = HttpResponse {
            status_code: 200,
            headers: HashMap::new(),
            body: r#"{"content":[{"name":"a"}]}"#.to_string(),
            duration_ms: 5,
        };

        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["content"][0]["name"], "a");
    }
}
