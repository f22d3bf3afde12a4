//! Google Maps Platform provider (Geocoding + Directions).

use super::{
    Coordinate, Directions, DirectionsProvider, DirectionsRequest, Geocoder, Leg, ProviderError,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Google Maps web-service client.
///
/// - Geocoding via GET /maps/api/geocode/json?address={name}
/// - Directions via GET /maps/api/directions/json?origin=..&destination=..&waypoints=a|b
///
/// Both APIs answer 200 with a `status` field; `ZERO_RESULTS` is a normal
/// empty outcome, anything other than `OK` is reported as [`ProviderError::Status`].
pub struct GoogleMaps {
    /// Base URL (e.g., "https://maps.googleapis.com")
    base_url: String,
    /// API key for query parameter authentication
    api_key: String,
    language: String,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl GoogleMaps {
    pub fn new(base_url: String, api_key: String, client: Arc<Client>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            language: "ja".to_string(),
            timeout: Duration::from_secs(10),
            client,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str()), ("language", self.language.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_send(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Coordinate,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteBody>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct RouteBody {
    #[serde(default)]
    legs: Vec<LegBody>,
}

#[derive(Deserialize)]
struct LegBody {
    #[serde(default)]
    distance: Option<ValueField>,
    #[serde(default)]
    duration: Option<ValueField>,
}

#[derive(Deserialize)]
struct ValueField {
    value: u64,
}

fn status_error(status: String, message: Option<String>) -> ProviderError {
    ProviderError::Status {
        status,
        message: message.unwrap_or_default(),
    }
}

#[async_trait]
impl Geocoder for GoogleMaps {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, ProviderError> {
        let body: GeocodeResponse = self
            .get_json("/maps/api/geocode/json", &[("address", place.to_string())])
            .await?;

        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().next().map(|r| r.geometry.location)),
            "ZERO_RESULTS" => Ok(None),
            _ => Err(status_error(body.status, body.error_message)),
        }
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Option<Directions>, ProviderError> {
        let mut query = vec![
            ("origin", request.origin.to_string()),
            ("destination", request.destination.to_string()),
            ("mode", "bicycling".to_string()),
            ("alternatives", "false".to_string()),
        ];
        if !request.waypoints.is_empty() {
            let waypoints = request
                .waypoints
                .iter()
                .map(Coordinate::to_string)
                .collect::<Vec<_>>()
                .join("|");
            query.push(("waypoints", waypoints));
        }

        let body: DirectionsResponse = self.get_json("/maps/api/directions/json", &query).await?;

        match body.status.as_str() {
            "OK" => Ok(body.routes.into_iter().next().map(|route| Directions {
                legs: route
                    .legs
                    .into_iter()
                    .map(|leg| Leg {
                        distance_meters: leg.distance.map(|d| d.value).unwrap_or(0),
                        duration_seconds: leg.duration.map(|d| d.value).unwrap_or(0),
                    })
                    .collect(),
            })),
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
            _ => Err(status_error(body.status, body.error_message)),
        }
    }
}
