//! API-facing result: three positionally aligned arrays.

use super::state::{GeoPoint, RouteDetail};
use serde::{Deserialize, Serialize};

/// A point as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<&GeoPoint> for RoutePoint {
    fn from(point: &GeoPoint) -> Self {
        Self {
            lat: point.lat,
            lng: point.lng,
            name: point.name.clone(),
        }
    }
}

/// `routes[i]`, `distances[i]` and `descriptions[i]` describe the same route.
///
/// Empty arrays mean no route could be planned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routes: Vec<Vec<RoutePoint>>,
    /// Kilometers
    pub distances: Vec<f64>,
    pub descriptions: Vec<String>,
}

impl RouteResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

impl From<&[RouteDetail]> for RouteResponse {
    fn from(details: &[RouteDetail]) -> Self {
        let mut response = Self {
            routes: Vec::with_capacity(details.len()),
            distances: Vec::with_capacity(details.len()),
            descriptions: Vec::with_capacity(details.len()),
        };
        for detail in details {
            response
                .routes
                .push(detail.points.iter().map(RoutePoint::from).collect());
            response.distances.push(detail.distance_km);
            response.descriptions.push(detail.description.clone());
        }
        response
    }
}
