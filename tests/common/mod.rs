//! Shared test utilities for route planner integration tests.
//!
//! Provides the well-known places used across scenarios, completion
//! payload builders, and helpers to assemble a pipeline or router over
//! in-memory providers.

#![allow(dead_code)]

use axum::body::Body;
use futures::StreamExt;
use route_planner::api::{create_router, AppState};
use route_planner::config::PlannerConfig;
use route_planner::pipeline::RoutePipeline;
use route_planner::provider::mock::{MapGeocoder, ScriptedDirections, StaticCompletion};
use route_planner::provider::Providers;
use std::sync::Arc;

// =============================================================================
// Well-Known Places
// =============================================================================

pub const START: (&str, f64, f64) = ("樟葉駅", 34.859034, 135.677555);
pub const YODOGAWA: (&str, f64, f64) = ("淀川河川公園", 34.801234, 135.68321);
pub const OSAKA_CASTLE: (&str, f64, f64) = ("大阪城公園", 34.689012, 135.645678);
pub const ARASHIYAMA: (&str, f64, f64) = ("嵐山", 35.016789, 135.677);

/// Geocoder that knows every well-known place.
pub fn known_places() -> MapGeocoder {
    [START, YODOGAWA, OSAKA_CASTLE, ARASHIYAMA]
        .into_iter()
        .fold(MapGeocoder::new(), |geocoder, (name, lat, lng)| {
            geocoder.with_place(name, lat, lng)
        })
}

// =============================================================================
// Completion Payloads
// =============================================================================

/// One route outline: direction, waypoint names, description.
pub struct OutlineFixture<'a> {
    pub direction: &'a str,
    pub waypoints: &'a [&'a str],
    pub description: &'a str,
}

/// Completion text in the shape the interpreter expects.
pub fn proposal_json(start: &str, outlines: &[OutlineFixture<'_>]) -> String {
    let routes: Vec<serde_json::Value> = outlines
        .iter()
        .map(|o| {
            serde_json::json!({
                "direction": o.direction,
                "waypoints": o
                    .waypoints
                    .iter()
                    .map(|name| serde_json::json!({"name": name, "description": ""}))
                    .collect::<Vec<_>>(),
                "description": o.description,
            })
        })
        .collect();

    serde_json::json!({
        "start_location": {"name": start},
        "constraints": {"radius_km": 100, "route_count": outlines.len()},
        "suggested_routes": routes,
    })
    .to_string()
}

/// The single-outline proposal used by the main scenarios.
pub fn osaka_proposal() -> String {
    proposal_json(
        START.0,
        &[OutlineFixture {
            direction: "南西",
            waypoints: &[YODOGAWA.0, OSAKA_CASTLE.0],
            description: "淀川沿いに大阪城へ向かうルート",
        }],
    )
}

// =============================================================================
// Pipeline and App Builders
// =============================================================================

pub fn providers(
    completion: Arc<StaticCompletion>,
    geocoder: Arc<MapGeocoder>,
    directions: Arc<ScriptedDirections>,
) -> Providers {
    Providers::new(completion, geocoder, directions)
}

pub fn pipeline(providers: &Providers) -> RoutePipeline {
    RoutePipeline::standard(providers, &PlannerConfig::default())
}

/// Router over in-memory providers with default config.
pub fn app(providers: &Providers) -> axum::Router {
    app_with_config(providers, PlannerConfig::default())
}

pub fn app_with_config(providers: &Providers, config: PlannerConfig) -> axum::Router {
    let pipeline = RoutePipeline::standard(providers, &config);
    let state = Arc::new(AppState::new(Arc::new(config), Arc::new(pipeline)));
    create_router(state)
}

// =============================================================================
// HTTP Helpers
// =============================================================================

pub async fn body_to_string(body: Body) -> String {
    let mut body_stream = body.into_data_stream();
    let mut result = String::new();
    while let Some(chunk) = body_stream.next().await {
        if let Ok(bytes) = chunk {
            result.push_str(&String::from_utf8_lossy(&bytes));
        }
    }
    result
}

/// `POST /api/route` with a JSON body.
pub fn route_request(body: serde_json::Value) -> axum::http::Request<Body> {
    let body = body.to_string();
    axum::http::Request::builder()
        .method("POST")
        .uri("/api/route")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap()
}
