//! Route planning pipeline
//!
//! A request flows through three stages, strictly in order:
//!
//! 1. [`RequestInterpreter`] - prompt → start name, constraints, route outlines
//! 2. [`LocationResolver`] - names → coordinates (start is mandatory, waypoints optional)
//! 3. [`RouteDetailer`] - coordinates → routed distance/duration, or a straight-line estimate
//!
//! Each stage takes the [`PipelineState`] by value and returns the next one.
//! Once a stage appends to `errors`, later stages hand the state back
//! unchanged. [`RoutePipeline::plan`] never fails: any failure, including a
//! panic inside a stage, ends in an empty [`RouteResponse`].

pub mod detailer;
pub mod error;
pub mod fallback;
pub mod interpreter;
pub mod prompt;
pub mod resolver;
pub mod response;
pub mod state;

pub use detailer::RouteDetailer;
pub use error::PipelineError;
pub use fallback::{haversine_km, path_distance_km, FallbackEstimator};
pub use interpreter::RequestInterpreter;
pub use resolver::LocationResolver;
pub use response::{RoutePoint, RouteResponse};
pub use state::{
    Constraints, GeoPoint, PipelineState, PointKind, ResolvedLocations, ResolvedRouteLocations,
    RouteDetail, RouteOutline, Waypoint,
};

use crate::config::PlannerConfig;
use crate::logging::response_outcome;
use crate::metrics::{REQUESTS_TOTAL, STAGE_DURATION_SECONDS, STAGE_ERRORS_TOTAL};
use crate::provider::Providers;
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// One step of the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage identifier for logs and metric labels.
    fn name(&self) -> &'static str;

    /// Produce the next state.
    ///
    /// Must not fail: errors are appended to `state.errors`. Must return the
    /// input unchanged when it already carries errors (except the first
    /// stage, which always starts from a fresh state).
    async fn run(&self, state: PipelineState) -> PipelineState;
}

/// Fixed sequence of stages, shared by all requests.
pub struct RoutePipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl RoutePipeline {
    /// Create a pipeline that runs `stages` in the order given.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Interpreter → resolver → detailer over the given providers.
    pub fn standard(providers: &Providers, config: &PlannerConfig) -> Self {
        let pipeline = &config.pipeline;
        Self::new(vec![
            Box::new(
                RequestInterpreter::new(Arc::clone(&providers.completion))
                    .with_content_logging(config.logging.enable_content_logging),
            ),
            Box::new(
                LocationResolver::new(Arc::clone(&providers.geocoder))
                    .with_max_concurrency(pipeline.max_concurrent_lookups),
            ),
            Box::new(
                RouteDetailer::new(Arc::clone(&providers.directions))
                    .with_estimator(FallbackEstimator::new(pipeline.fallback_seconds_per_km))
                    .with_max_concurrency(pipeline.max_concurrent_lookups),
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage once, in order.
    pub async fn execute(&self, mut state: PipelineState) -> PipelineState {
        let pipeline_start = Instant::now();

        for stage in &self.stages {
            let stage_start = Instant::now();
            let errors_before = state.errors.len();

            state = stage.run(state).await;

            let elapsed = stage_start.elapsed();
            metrics::histogram!(STAGE_DURATION_SECONDS, "stage" => stage.name())
                .record(elapsed.as_secs_f64());

            let failed = state.errors.len() > errors_before;
            if failed {
                metrics::counter!(STAGE_ERRORS_TOTAL, "stage" => stage.name()).increment(1);
            }

            tracing::debug!(
                stage = stage.name(),
                elapsed_ms = elapsed.as_millis() as u64,
                failed,
                "Stage completed"
            );
        }

        tracing::debug!(
            elapsed_ms = pipeline_start.elapsed().as_millis() as u64,
            routes = state.route_details.len(),
            errors = state.errors.len(),
            "Pipeline execution completed"
        );

        state
    }

    /// Plan routes for `prompt`, offering `start_location_hint` as the default start.
    ///
    /// Whatever `route_details` the run produced are converted, even when
    /// `errors` is non-empty; stages that record errors leave no details
    /// behind, so a failed run converts to the empty response.
    pub async fn plan(&self, prompt: &str, start_location_hint: &str) -> RouteResponse {
        let state = PipelineState::new(prompt, start_location_hint);

        let state = match AssertUnwindSafe(self.execute(state)).catch_unwind().await {
            Ok(state) => state,
            Err(_) => {
                tracing::error!("Pipeline panicked, returning empty response");
                metrics::counter!(REQUESTS_TOTAL, "outcome" => "panic").increment(1);
                return RouteResponse::empty();
            }
        };

        if state.has_errors() {
            tracing::warn!(errors = ?state.errors, "Pipeline finished with errors");
        }

        let response = RouteResponse::from(state.route_details.as_slice());
        let outcome = response_outcome(response.len());
        metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);

        tracing::info!(
            routes = response.len(),
            errors = state.errors.len(),
            "Route planning finished"
        );
        response
    }
}
