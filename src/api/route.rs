//! Route planning endpoint handler.

use super::types::{RouteRequest, RouteResponse};
use super::AppState;
use crate::logging::{new_request_id, prompt_preview};
use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// POST /api/route - plan routes for a free-text prompt.
///
/// Always 200. Failures of any kind, including running past the configured
/// request timeout, answer with empty arrays; the cause is only logged.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Json<RouteResponse> {
    let request_id = new_request_id();
    let start_hint = request
        .start_hint(&state.config.pipeline.default_start_location)
        .to_string();
    let span = tracing::info_span!("route_request", request_id = %request_id);

    async move {
        let started = Instant::now();
        let preview = prompt_preview(
            &request.prompt,
            state.config.logging.prompt_preview_limit(),
        );
        tracing::info!(start = %start_hint, prompt = ?preview, "Planning request received");

        let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
        let response =
            match tokio::time::timeout(timeout, state.pipeline.plan(&request.prompt, &start_hint))
                .await
            {
                Ok(response) => response,
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = timeout.as_secs(),
                        "Planning request timed out"
                    );
                    metrics::counter!(crate::metrics::REQUESTS_TOTAL, "outcome" => "timeout")
                        .increment(1);
                    RouteResponse::empty()
                }
            };

        tracing::info!(
            routes = response.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Planning request completed"
        );
        Json(response)
    }
    .instrument(span)
    .await
}
