//! Types exchanged with the external services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw latitude/longitude pair as returned by a geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// `lat,lng`, the form the directions API expects for origin/destination/waypoints.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Ordered bicycle path request: origin, intermediate waypoints, destination.
///
/// Providers ask for a single bicycling route, never alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
}

impl DirectionsRequest {
    /// Route through `points` in order.
    ///
    /// Returns `None` for an empty slice. A single point yields a request whose
    /// origin and destination coincide.
    pub fn bicycling(points: &[Coordinate]) -> Option<Self> {
        let origin = *points.first()?;
        let destination = *points.last()?;
        let waypoints = if points.len() > 2 {
            points[1..points.len() - 1].to_vec()
        } else {
            Vec::new()
        };
        Some(Self {
            origin,
            destination,
            waypoints,
        })
    }
}

/// One leg of a returned route (between consecutive stops).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Leg {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// First route returned by a directions provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Directions {
    pub legs: Vec<Leg>,
}

impl Directions {
    /// Total distance across all legs, in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_meters).sum::<u64>() as f64 / 1000.0
    }

    /// Total duration across all legs, in seconds.
    pub fn duration_seconds(&self) -> u64 {
        self.legs.iter().map(|l| l.duration_seconds).sum()
    }
}
