//! Outbound service providers.
//!
//! The pipeline depends on three collaborators, each behind a trait so the
//! HTTP clients can be swapped for in-memory fakes:
//!
//! - [`CompletionProvider`] turns an instruction into free text
//! - [`Geocoder`] turns a place name into a coordinate
//! - [`DirectionsProvider`] turns an ordered list of coordinates into a routable path
//!
//! All traits are object-safe and used as `Arc<dyn ...>`. Implementations are
//! built once at startup (see [`factory`]) and shared across requests.

use async_trait::async_trait;

pub mod error;
pub mod factory;
pub mod google;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod openai;
pub mod types;

pub use error::ProviderError;
pub use factory::Providers;
pub use types::{Coordinate, Directions, DirectionsRequest, Leg};

/// Text-completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw response text.
    ///
    /// The text is not guaranteed to be JSON; callers parse it themselves.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Place-name to coordinate lookup.
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    /// Resolve `place` to a coordinate.
    ///
    /// - `Ok(Some(_))` when the place was found
    /// - `Ok(None)` when the service has no result (a normal outcome)
    /// - `Err(_)` when the call itself failed
    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Routing service.
#[async_trait]
pub trait DirectionsProvider: Send + Sync + 'static {
    /// Fetch a path through the request's points.
    ///
    /// `Ok(None)` means the service found no route.
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Option<Directions>, ProviderError>;
}
