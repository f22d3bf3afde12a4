//! # HTTP API
//!
//! Thin axum wrapper around [`RoutePipeline`].
//!
//! ## Endpoints
//!
//! - `POST /api/route` - plan routes; always 200, empty arrays on failure
//! - `GET /healthz` - liveness
//! - `GET /metrics` - Prometheus text format
//!
//! ## Example
//!
//! ```no_run
//! use route_planner::api::{create_router, AppState};
//! use route_planner::config::PlannerConfig;
//! use route_planner::pipeline::RoutePipeline;
//! use route_planner::provider::Providers;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlannerConfig::default();
//! let credentials = config.resolve_credentials()?;
//! let providers = Providers::from_config(&config, &credentials)?;
//! let pipeline = RoutePipeline::standard(&providers, &config);
//!
//! let state = Arc::new(AppState::new(Arc::new(config), Arc::new(pipeline)));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod health;
mod route;
pub mod types;

pub use types::*;

use crate::config::PlannerConfig;
use crate::metrics::PrometheusHandle;
use crate::pipeline::RoutePipeline;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    pub pipeline: Arc<RoutePipeline>,
    /// Server startup time
    pub start_time: Instant,
    pub prometheus_handle: PrometheusHandle,
}

impl AppState {
    /// Create application state, installing the metrics recorder if none is installed yet.
    pub fn new(config: Arc<PlannerConfig>, pipeline: Arc<RoutePipeline>) -> Self {
        Self {
            config,
            pipeline,
            start_time: Instant::now(),
            prometheus_handle: crate::metrics::handle_or_detached(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Create the API router with all endpoints and layers configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/route", post(route::handle))
        .route("/healthz", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
