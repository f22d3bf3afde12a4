//! Outbound service configuration (completion + maps)

use serde::{Deserialize, Serialize};

/// Text-completion service (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub temperature: f32,
    /// Ask the service for a JSON object response
    pub json_mode: bool,
    pub timeout_seconds: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
            json_mode: true,
            timeout_seconds: 60,
        }
    }
}

/// Google Maps Platform (Geocoding + Directions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub base_url: String,
    pub api_key_env: String,
    /// Result language passed to both APIs
    pub language: String,
    pub timeout_seconds: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            language: "ja".to_string(),
            timeout_seconds: 10,
        }
    }
}
