//! HTTP client module
//!
//! Thin request/response wrapper over reqwest used by the API action layer.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
