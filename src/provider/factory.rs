//! Builds the process-wide provider set from configuration.

use super::{
    google::GoogleMaps, openai::OpenAICompletion, CompletionProvider, DirectionsProvider, Geocoder,
    ProviderError,
};
use crate::config::{Credentials, PlannerConfig};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// The three collaborators the pipeline needs, created once at startup.
#[derive(Clone)]
pub struct Providers {
    pub completion: Arc<dyn CompletionProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub directions: Arc<dyn DirectionsProvider>,
}

impl Providers {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
    ) -> Self {
        Self {
            completion,
            geocoder,
            directions,
        }
    }

    /// Create HTTP-backed providers sharing one connection pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::config::{Credentials, PlannerConfig};
    /// use route_planner::provider::Providers;
    ///
    /// let config = PlannerConfig::default();
    /// let credentials = Credentials {
    ///     completion_api_key: "sk-test".to_string(),
    ///     maps_api_key: "maps-test".to_string(),
    /// };
    /// let providers = Providers::from_config(&config, &credentials).unwrap();
    /// assert_eq!(providers.completion.name(), "gpt-4o-mini");
    /// ```
    pub fn from_config(
        config: &PlannerConfig,
        credentials: &Credentials,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;
        let client = Arc::new(client);

        let completion = OpenAICompletion::new(
            config.completion.base_url.clone(),
            credentials.completion_api_key.clone(),
            config.completion.model.clone(),
            Arc::clone(&client),
        )
        .with_temperature(config.completion.temperature)
        .with_json_mode(config.completion.json_mode)
        .with_timeout(Duration::from_secs(config.completion.timeout_seconds));

        let maps = Arc::new(
            GoogleMaps::new(
                config.maps.base_url.clone(),
                credentials.maps_api_key.clone(),
                client,
            )
            .with_language(config.maps.language.clone())
            .with_timeout(Duration::from_secs(config.maps.timeout_seconds)),
        );

        tracing::info!(
            completion_url = %config.completion.base_url,
            model = %config.completion.model,
            maps_url = %config.maps.base_url,
            "Configured external providers"
        );

        Ok(Self {
            completion: Arc::new(completion),
            geocoder: maps.clone(),
            directions: maps,
        })
    }
}
