//! Stage 3: fetch a routed path per outline, or estimate one.

use super::error::PipelineError;
use super::fallback::FallbackEstimator;
use super::state::{GeoPoint, PipelineState, RouteDetail};
use super::Stage;
use crate::metrics::FALLBACKS_TOTAL;
use crate::provider::{Coordinate, DirectionsProvider, DirectionsRequest};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// One unit of work: the full point list of a route and its description.
struct RouteWork {
    route_index: usize,
    points: Vec<GeoPoint>,
    description: String,
}

/// Requests a bicycle route for every resolved outline.
///
/// A directions failure (error, timeout, no route, empty legs) is handled per
/// route by the straight-line [`FallbackEstimator`]; it never aborts sibling
/// routes and never lands in `errors`.
pub struct RouteDetailer {
    directions: Arc<dyn DirectionsProvider>,
    estimator: FallbackEstimator,
    max_concurrency: usize,
}

impl RouteDetailer {
    pub fn new(directions: Arc<dyn DirectionsProvider>) -> Self {
        Self {
            directions,
            estimator: FallbackEstimator::default(),
            max_concurrency: 1,
        }
    }

    pub fn with_estimator(mut self, estimator: FallbackEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Fetch up to `n` routes at once. Output order follows the outlines.
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    fn plan_work(&self, state: &PipelineState) -> Result<Vec<RouteWork>, PipelineError> {
        let resolved = state
            .resolved_locations
            .as_ref()
            .ok_or(PipelineError::MissingInput {
                stage: "detailer",
                missing: "resolved_locations",
            })?;

        let mut work = Vec::with_capacity(resolved.routes.len());
        for route in &resolved.routes {
            if route.locations.is_empty() {
                tracing::debug!(route_index = route.route_index, "Skipping route with no locations");
                continue;
            }
            let outline = state
                .suggested_routes
                .get(route.route_index)
                .ok_or(PipelineError::UnknownRoute(route.route_index))?;

            let mut points = Vec::with_capacity(route.locations.len() + 1);
            points.push(resolved.start.clone());
            points.extend(route.locations.iter().cloned());

            work.push(RouteWork {
                route_index: route.route_index,
                points,
                description: outline.description.clone(),
            });
        }
        Ok(work)
    }

    async fn detail_route(&self, work: RouteWork) -> RouteDetail {
        let coordinates: Vec<Coordinate> = work.points.iter().map(GeoPoint::coordinate).collect();

        let routed = match DirectionsRequest::bicycling(&coordinates) {
            Some(request) => match self.directions.route(&request).await {
                Ok(Some(directions)) if !directions.legs.is_empty() => Ok(directions),
                Ok(_) => Err("no route found".to_string()),
                Err(e) => Err(e.to_string()),
            },
            None => Err("empty point list".to_string()),
        };

        match routed {
            Ok(directions) => {
                tracing::debug!(
                    route_index = work.route_index,
                    legs = directions.legs.len(),
                    distance_km = directions.distance_km(),
                    "Route fetched from directions provider"
                );
                RouteDetail {
                    distance_km: directions.distance_km(),
                    duration_seconds: directions.duration_seconds(),
                    points: work.points,
                    description: work.description,
                    estimated: false,
                }
            }
            Err(reason) => {
                let (distance_km, duration_seconds) = self.estimator.estimate(&work.points);
                tracing::warn!(
                    route_index = work.route_index,
                    reason = %reason,
                    distance_km,
                    "Directions unavailable, using straight-line estimate"
                );
                metrics::counter!(FALLBACKS_TOTAL).increment(1);
                RouteDetail {
                    distance_km,
                    duration_seconds,
                    points: work.points,
                    description: work.description,
                    estimated: true,
                }
            }
        }
    }
}

#[async_trait]
impl Stage for RouteDetailer {
    fn name(&self) -> &'static str {
        "detailer"
    }

    async fn run(&self, state: PipelineState) -> PipelineState {
        if state.has_errors() {
            return state;
        }

        let work = match self.plan_work(&state) {
            Ok(work) => work,
            Err(e) => {
                tracing::warn!(error = %e, "Route detailing failed");
                return state.with_error(e);
            }
        };

        let route_details: Vec<RouteDetail> = stream::iter(work)
            .map(|w| self.detail_route(w))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        PipelineState {
            route_details,
            ..state
        }
    }
}
