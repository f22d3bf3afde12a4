//! Pipeline tuning

use serde::{Deserialize, Serialize};

/// Start location used when a request names none.
pub const DEFAULT_START_LOCATION: &str = "樟葉駅";

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub default_start_location: String,
    /// Seconds per km for the straight-line duration estimate (300 = 12 km/h)
    pub fallback_seconds_per_km: f64,
    /// Concurrent geocoding / directions calls per stage; 1 runs them sequentially
    pub max_concurrent_lookups: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_start_location: DEFAULT_START_LOCATION.to_string(),
            fallback_seconds_per_km: 300.0,
            max_concurrent_lookups: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.default_start_location, "樟葉駅");
        assert_eq!(config.fallback_seconds_per_km, 300.0);
        assert_eq!(config.max_concurrent_lookups, 4);
    }
}
