//! Pipeline state and the records it carries between stages.
//!
//! A fresh [`PipelineState`] is created per request and moved through the
//! stages by value. Each stage returns a new state that differs from its
//! input only in the fields that stage owns:
//!
//! | Field | Owner |
//! |---|---|
//! | `prompt`, `start_location_hint` | request (never changed) |
//! | `start_location_name`, `constraints`, `suggested_routes` | interpreter |
//! | `resolved_locations` | resolver |
//! | `route_details` | detailer |
//! | `errors` | any stage, append-only |

use super::error::PipelineError;
use crate::provider::Coordinate;
use serde::{Deserialize, Deserializer, Serialize};

/// Role of a point within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Start,
    Waypoint,
}

/// A named, validated geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub name: Option<String>,
    pub kind: PointKind,
}

impl GeoPoint {
    /// Build a point, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180] (NaN included).
    pub fn new(
        lat: f64,
        lng: f64,
        name: Option<String>,
        kind: PointKind,
    ) -> Result<Self, PipelineError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(PipelineError::InvalidCoordinate { lat, lng });
        }
        Ok(Self {
            lat,
            lng,
            name,
            kind,
        })
    }

    pub fn from_coordinate(
        coordinate: Coordinate,
        name: &str,
        kind: PointKind,
    ) -> Result<Self, PipelineError> {
        Self::new(coordinate.lat, coordinate.lng, Some(name.to_string()), kind)
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Numeric limits the interpreter extracted from the prompt.
///
/// Informational only: nothing downstream reads them, so a malformed value
/// falls back to zero instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, deserialize_with = "lenient_number")]
    pub radius_km: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub route_count: u32,
}

/// Accepts `100`, `100.5` or `"100km"`; anything else is 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or_default(),
        serde_json::Value::String(s) => leading_number(&s).unwrap_or_default(),
        _ => 0.0,
    })
}

/// Accepts `3`, `3.0` or `"3"`, rounded to the nearest non-negative integer.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_number(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value.round().min(u32::MAX as f64) as u32)
    } else {
        Ok(0)
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// A named stop proposed by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A route sketch before any coordinates are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutline {
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub description: String,
}

/// Waypoints of one outline that resolved, in outline order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRouteLocations {
    /// Index into `suggested_routes`
    pub route_index: usize,
    /// May be empty; such routes are skipped by the detailer
    pub locations: Vec<GeoPoint>,
}

/// Output of the resolver: the start plus one entry per outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocations {
    pub start: GeoPoint,
    pub routes: Vec<ResolvedRouteLocations>,
}

impl ResolvedLocations {
    /// Number of entries counting the start as element 0.
    pub fn len(&self) -> usize {
        self.routes.len() + 1
    }

    /// Never empty: the start is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Final per-route result.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDetail {
    /// Starts with the resolved start location
    pub points: Vec<GeoPoint>,
    pub distance_km: f64,
    pub duration_seconds: u64,
    pub description: String,
    /// True when distance/duration came from the straight-line estimate
    pub estimated: bool,
}

/// State threaded through the three stages of one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineState {
    pub prompt: String,
    /// Start-location name offered to the interpreter as the default
    pub start_location_hint: String,
    pub start_location_name: String,
    pub constraints: Constraints,
    pub suggested_routes: Vec<RouteOutline>,
    pub resolved_locations: Option<ResolvedLocations>,
    pub route_details: Vec<RouteDetail>,
    pub errors: Vec<String>,
}

impl PipelineState {
    /// Fresh state seeded only with the request inputs.
    pub fn new(prompt: impl Into<String>, start_location_hint: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            start_location_hint: start_location_hint.into(),
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Same state with `error` appended.
    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.errors.push(error.to_string());
        self
    }
}
