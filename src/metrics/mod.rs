//! # Metrics
//!
//! Prometheus export for the planning pipeline, served at `GET /metrics`.
//!
//! **Counters:**
//! - `route_planner_requests_total{outcome}` - planning requests by outcome (`ok`, `empty`, `panic`, `timeout`)
//! - `route_planner_stage_errors_total{stage}` - stages that recorded an error
//! - `route_planner_waypoint_misses_total` - waypoints dropped because they did not geocode
//! - `route_planner_fallbacks_total` - routes estimated by straight-line distance
//!
//! **Histograms:**
//! - `route_planner_stage_duration_seconds{stage}` - wall time per stage

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "route_planner_requests_total";
pub const STAGE_DURATION_SECONDS: &str = "route_planner_stage_duration_seconds";
pub const STAGE_ERRORS_TOTAL: &str = "route_planner_stage_errors_total";
pub const WAYPOINT_MISSES_TOTAL: &str = "route_planner_waypoint_misses_total";
pub const FALLBACKS_TOTAL: &str = "route_planner_fallbacks_total";

/// Stage durations are dominated by outbound calls: completion takes
/// seconds, geocoding and directions tens to hundreds of milliseconds.
const STAGE_DURATION_BUCKETS: &[f64] = &[
    0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0,
];

/// Builder with the histogram buckets used for pipeline metrics.
fn builder() -> Result<PrometheusBuilder, metrics_exporter_prometheus::BuildError> {
    use metrics_exporter_prometheus::Matcher;

    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(STAGE_DURATION_SECONDS.to_string()),
        STAGE_DURATION_BUCKETS,
    )
}

/// Install the global Prometheus recorder.
///
/// Fails when a recorder is already installed (a second server in the same
/// process, or tests); see [`handle_or_detached`].
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    Ok(builder()?.install_recorder()?)
}

/// Install the recorder, or fall back to a handle that is not installed
/// globally when another recorder already is.
pub fn handle_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}
