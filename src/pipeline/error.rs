//! Error types recorded by pipeline stages

use crate::provider::ProviderError;
use thiserror::Error;

/// Failures a stage records in `PipelineState::errors`.
///
/// Only the variants below end a request; a waypoint that cannot be
/// geocoded and a directions failure are handled inside their stage and
/// never become a `PipelineError`.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The completion service call failed
    #[error("Completion request failed: {0}")]
    Completion(#[source] ProviderError),

    /// The completion text is not the expected JSON document
    #[error("Failed to parse completion response: {0}")]
    Parse(String),

    /// The geocoder has no result for the start location
    #[error("Could not find coordinates for {name}")]
    StartNotFound { name: String },

    /// The geocoder call for the start location failed
    #[error("Failed to geocode start location {name}: {source}")]
    StartGeocoding {
        name: String,
        #[source]
        source: ProviderError,
    },

    #[error("Coordinate out of range: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// A stage ran before the stage that feeds it
    #[error("Stage '{stage}' is missing its input: {missing}")]
    MissingInput {
        stage: &'static str,
        missing: &'static str,
    },

    /// Resolved locations point at an outline that does not exist
    #[error("Resolved route {0} has no matching outline")]
    UnknownRoute(usize),
}
