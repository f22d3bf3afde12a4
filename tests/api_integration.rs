//! Integration tests for the HTTP API.
//!
//! The router is driven directly through `tower::Service` with in-memory
//! providers behind the pipeline.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use route_planner::api::{HealthResponse, RouteResponse};
use route_planner::config::PlannerConfig;
use route_planner::provider::mock::{ScriptedDirections, StaticCompletion};
use std::sync::Arc;
use tower::Service;

fn working_providers() -> (Arc<StaticCompletion>, route_planner::provider::Providers) {
    let completion = Arc::new(StaticCompletion::text(osaka_proposal()));
    let providers = providers(
        completion.clone(),
        Arc::new(known_places()),
        Arc::new(ScriptedDirections::per_leg(8_000, 1_600)),
    );
    (completion, providers)
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    let health: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health, HealthResponse::ok());
}

#[tokio::test]
async fn test_route_success() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let response = app
        .call(route_request(serde_json::json!({"prompt": "大阪城まで"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    let route: RouteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(route.len(), 1);
    assert!((route.distances[0] - 16.0).abs() < 1e-9);
    assert_eq!(route.routes[0][0].name.as_deref(), Some(START.0));
}

#[tokio::test]
async fn test_route_failure_is_still_200_with_empty_arrays() {
    let providers = providers(
        Arc::new(StaticCompletion::text("not json at all")),
        Arc::new(known_places()),
        Arc::new(ScriptedDirections::per_leg(1, 1)),
    );
    let mut app = app(&providers);

    let response = app
        .call(route_request(serde_json::json!({"prompt": "p"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"routes": [], "distances": [], "descriptions": []})
    );
}

#[tokio::test]
async fn test_route_uses_request_start_hint() {
    let (completion, providers) = working_providers();
    let mut app = app(&providers);

    app.call(route_request(
        serde_json::json!({"prompt": "p", "start_location_name": "京都駅"}),
    ))
    .await
    .unwrap();

    assert!(completion.prompts()[0].contains("京都駅"));
}

#[tokio::test]
async fn test_route_uses_configured_default_start() {
    let (completion, providers) = working_providers();
    let mut config = PlannerConfig::default();
    config.pipeline.default_start_location = "枚方市駅".to_string();
    let mut app = app_with_config(&providers, config);

    app.call(route_request(serde_json::json!({"prompt": "p"})))
        .await
        .unwrap();

    assert!(completion.prompts()[0].contains("枚方市駅"));
}

#[tokio::test]
async fn test_route_missing_prompt_is_rejected() {
    let (completion, providers) = working_providers();
    let mut app = app(&providers);

    let response = app
        .call(route_request(serde_json::json!({"start_location_name": "x"})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(completion.calls(), 0);
}

#[tokio::test]
async fn test_route_body_too_large() {
    let (_, providers) = working_providers();
    let mut config = PlannerConfig::default();
    config.server.max_body_bytes = 64;
    let mut app = app_with_config(&providers, config);

    let response = app
        .call(route_request(serde_json::json!({"prompt": "x".repeat(1024)})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/route")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let request = Request::builder()
        .uri("/v1/unknown")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_on_route_is_405() {
    let (_, providers) = working_providers();
    let mut app = app(&providers);

    let request = Request::builder()
        .uri("/api/route")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
