//! Liveness endpoint handler.

use super::types::HealthResponse;
use axum::Json;

/// GET /healthz - always 200 `{"status":"ok"}`.
///
/// Does not probe the outbound services; a planning request that cannot
/// reach them still answers with an empty route list.
pub async fn handle() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
