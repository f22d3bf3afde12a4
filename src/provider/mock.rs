//! In-memory providers for tests.
//!
//! Compiled for unit tests and, via the `test-support` feature, for the
//! integration tests in `tests/`.

use super::{
    CompletionProvider, Coordinate, Directions, DirectionsProvider, DirectionsRequest, Geocoder,
    Leg, ProviderError,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Completion provider that always answers with the same text or error.
pub struct StaticCompletion {
    response: Result<String, u16>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StaticCompletion {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an upstream error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for StaticCompletion {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ProviderError::Upstream {
                status: *status,
                message: "mock completion failure".to_string(),
            }),
        }
    }
}

/// Geocoder backed by a name → coordinate table.
///
/// Unknown names resolve to `None`; names registered with
/// [`MapGeocoder::with_failure`] return an error; names registered with
/// [`MapGeocoder::with_panic`] panic.
#[derive(Default)]
pub struct MapGeocoder {
    places: HashMap<String, Coordinate>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    calls: AtomicUsize,
}

impl MapGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.places.insert(name.to_string(), Coordinate::new(lat, lng));
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn with_panic(mut self, name: &str) -> Self {
        self.panicking.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for MapGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking.contains(place) {
            panic!("mock geocoder panic for {}", place);
        }
        if self.failing.contains(place) {
            return Err(ProviderError::Status {
                status: "UNKNOWN_ERROR".to_string(),
                message: format!("mock failure for {}", place),
            });
        }
        Ok(self.places.get(place).copied())
    }
}

/// What [`ScriptedDirections`] answers for a request.
#[derive(Debug, Clone)]
pub enum DirectionsOutcome {
    Route(Directions),
    NoRoute,
    Fail,
}

/// Directions provider with a default outcome and per-destination overrides.
pub struct ScriptedDirections {
    default: DirectionsOutcome,
    overrides: Vec<(Coordinate, DirectionsOutcome)>,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl ScriptedDirections {
    /// Every request gets one leg per hop, each `meters_per_leg` long and
    /// `seconds_per_leg` long.
    pub fn per_leg(meters_per_leg: u64, seconds_per_leg: u64) -> Self {
        Self::with_default(DirectionsOutcome::Route(Directions {
            legs: vec![Leg {
                distance_meters: meters_per_leg,
                duration_seconds: seconds_per_leg,
            }],
        }))
    }

    pub fn no_route() -> Self {
        Self::with_default(DirectionsOutcome::NoRoute)
    }

    pub fn failing() -> Self {
        Self::with_default(DirectionsOutcome::Fail)
    }

    pub fn with_default(default: DirectionsOutcome) -> Self {
        Self {
            default,
            overrides: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Use `outcome` for requests whose destination is `destination`.
    pub fn with_override(mut self, destination: Coordinate, outcome: DirectionsOutcome) -> Self {
        self.overrides.push((destination, outcome));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DirectionsProvider for ScriptedDirections {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Option<Directions>, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let outcome = self
            .overrides
            .iter()
            .find(|(dest, _)| *dest == request.destination)
            .map(|(_, outcome)| outcome)
            .unwrap_or(&self.default);

        match outcome {
            DirectionsOutcome::Route(template) => {
                // one leg per hop: origin → each waypoint → destination
                let Some(leg) = template.legs.first().copied() else {
                    return Ok(Some(template.clone()));
                };
                let hops = request.waypoints.len() + 1;
                Ok(Some(Directions {
                    legs: vec![leg; hops],
                }))
            }
            DirectionsOutcome::NoRoute => Ok(None),
            DirectionsOutcome::Fail => Err(ProviderError::Upstream {
                status: 500,
                message: "mock directions failure".to_string(),
            }),
        }
    }
}
