//! Request and response bodies of the HTTP API.

use crate::config::DEFAULT_START_LOCATION;
use serde::{Deserialize, Serialize};

pub use crate::pipeline::{RoutePoint, RouteResponse};

/// Body of `POST /api/route`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteRequest {
    pub prompt: String,
    /// Default start offered to the completion service. Falls back to the
    /// configured `pipeline.default_start_location` when absent or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location_name: Option<String>,
}

impl RouteRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            start_location_name: None,
        }
    }

    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.start_location_name = Some(name.into());
        self
    }

    /// Start hint to seed the pipeline with.
    pub fn start_hint<'a>(&'a self, configured_default: &'a str) -> &'a str {
        let name = self
            .start_location_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        match name {
            Some(name) => name,
            None if configured_default.trim().is_empty() => DEFAULT_START_LOCATION,
            None => configured_default,
        }
    }
}

/// Body of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
