//! Stage 2: geocode the start location and every outline's waypoints.

use super::error::PipelineError;
use super::state::{
    GeoPoint, PipelineState, PointKind, ResolvedLocations, ResolvedRouteLocations, Waypoint,
};
use super::Stage;
use crate::metrics::WAYPOINT_MISSES_TOTAL;
use crate::provider::Geocoder;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::sync::Arc;

/// Resolves place names to coordinates.
///
/// The start location is mandatory: no result, a geocoder error or an
/// out-of-range coordinate fails the request. Waypoints are optional: a
/// waypoint that does not resolve is dropped from its route and logged.
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    max_concurrency: usize,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            max_concurrency: 1,
        }
    }

    /// Geocode up to `n` waypoints of a route at once. Order is preserved.
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    async fn resolve_start(&self, name: &str) -> Result<GeoPoint, PipelineError> {
        let coordinate = self
            .geocoder
            .geocode(name)
            .await
            .map_err(|source| PipelineError::StartGeocoding {
                name: name.to_string(),
                source,
            })?
            .ok_or_else(|| PipelineError::StartNotFound {
                name: name.to_string(),
            })?;

        GeoPoint::from_coordinate(coordinate, name, PointKind::Start)
    }

    async fn resolve_waypoint(&self, route_index: usize, waypoint: &Waypoint) -> Option<GeoPoint> {
        let result = match self.geocoder.geocode(&waypoint.name).await {
            Ok(Some(coordinate)) => {
                GeoPoint::from_coordinate(coordinate, &waypoint.name, PointKind::Waypoint)
                    .map_err(|e| e.to_string())
            }
            Ok(None) => Err("no geocoding result".to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(point) => Some(point),
            Err(reason) => {
                tracing::warn!(
                    route_index,
                    waypoint = %waypoint.name,
                    reason = %reason,
                    "Dropping waypoint that could not be geocoded"
                );
                metrics::counter!(WAYPOINT_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    async fn resolve_route(
        &self,
        route_index: usize,
        waypoints: &[Waypoint],
    ) -> ResolvedRouteLocations {
        let lookups: Vec<_> = waypoints
            .iter()
            .map(|waypoint| self.resolve_waypoint(route_index, waypoint).boxed())
            .collect();

        let locations: Vec<GeoPoint> = stream::iter(lookups)
            .buffered(self.max_concurrency)
            .filter_map(|point| async move { point })
            .collect()
            .await;

        tracing::debug!(
            route_index,
            requested = waypoints.len(),
            resolved = locations.len(),
            "Route waypoints resolved"
        );

        ResolvedRouteLocations {
            route_index,
            locations,
        }
    }

    async fn resolve(&self, state: &PipelineState) -> Result<ResolvedLocations, PipelineError> {
        let start = self.resolve_start(&state.start_location_name).await?;

        let mut routes = Vec::with_capacity(state.suggested_routes.len());
        for (route_index, outline) in state.suggested_routes.iter().enumerate() {
            routes.push(self.resolve_route(route_index, &outline.waypoints).await);
        }

        Ok(ResolvedLocations { start, routes })
    }
}

#[async_trait]
impl Stage for LocationResolver {
    fn name(&self) -> &'static str {
        "resolver"
    }

    async fn run(&self, state: PipelineState) -> PipelineState {
        if state.has_errors() {
            return state;
        }

        match self.resolve(&state).await {
            Ok(resolved) => PipelineState {
                resolved_locations: Some(resolved),
                ..state
            },
            Err(e) => {
                tracing::warn!(error = %e, "Location resolution failed");
                state.with_error(e)
            }
        }
    }
}
