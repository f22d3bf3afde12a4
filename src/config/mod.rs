//! Configuration module for the route planner
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ROUTE_PLANNER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! Service credentials never live in the file. The file only names the
//! environment variables that hold them (`api_key_env`), and
//! [`PlannerConfig::resolve_credentials`] reads those once at startup.
//!
//! # Example
//!
//! ```rust
//! use route_planner::config::PlannerConfig;
//!
//! let config = PlannerConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: PlannerConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod providers;
pub mod server;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use pipeline::{PipelineConfig, DEFAULT_START_LOCATION};
pub use providers::{CompletionConfig, MapsConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Unified configuration for the route planner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Text-completion service
    pub completion: CompletionConfig,
    /// Geocoding and directions service
    pub maps: MapsConfig,
    /// Pipeline tuning
    pub pipeline: PipelineConfig,
}

/// API keys for the two external services, resolved at startup.
#[derive(Clone)]
pub struct Credentials {
    pub completion_api_key: String,
    pub maps_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("completion_api_key", &"<redacted>")
            .field("maps_api_key", &"<redacted>")
            .finish()
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content =
                    std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                        path: p.to_path_buf(),
                        source,
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports ROUTE_PLANNER_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("ROUTE_PLANNER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("ROUTE_PLANNER_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("ROUTE_PLANNER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ROUTE_PLANNER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(model) = std::env::var("ROUTE_PLANNER_COMPLETION_MODEL") {
            self.completion.model = model;
        }
        if let Ok(start) = std::env::var("ROUTE_PLANNER_DEFAULT_START") {
            if !start.trim().is_empty() {
                self.pipeline.default_start_location = start;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(validation("server.port", "port must be non-zero"));
        }
        if self.completion.base_url.is_empty() {
            return Err(validation("completion.base_url", "URL cannot be empty"));
        }
        if self.maps.base_url.is_empty() {
            return Err(validation("maps.base_url", "URL cannot be empty"));
        }
        if self.completion.timeout_seconds == 0 {
            return Err(validation(
                "completion.timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.maps.timeout_seconds == 0 {
            return Err(validation("maps.timeout_seconds", "timeout must be non-zero"));
        }
        if self.pipeline.max_concurrent_lookups == 0 {
            return Err(validation(
                "pipeline.max_concurrent_lookups",
                "must be at least 1",
            ));
        }
        let factor = self.pipeline.fallback_seconds_per_km;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(validation(
                "pipeline.fallback_seconds_per_km",
                "must be a positive number",
            ));
        }
        if self.pipeline.default_start_location.trim().is_empty() {
            return Err(validation(
                "pipeline.default_start_location",
                "cannot be empty",
            ));
        }
        if self.logging.prompt_preview_chars == 0 {
            return Err(validation(
                "logging.prompt_preview_chars",
                "must be at least 1",
            ));
        }
        let directives = crate::logging::build_filter_directives(&self.logging);
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&directives) {
            return Err(validation("logging.level", &e.to_string()));
        }
        Ok(())
    }

    /// Read both service API keys from the environment.
    ///
    /// A missing or blank key is a startup error; the server must not come up
    /// without them.
    pub fn resolve_credentials(&self) -> Result<Credentials, ConfigError> {
        let [completion, maps] = self.credential_env_vars().map(|(service, env_var)| {
            lookup_credential(env_var).ok_or_else(|| ConfigError::MissingCredential {
                service,
                env_var: env_var.to_string(),
            })
        });
        Ok(Credentials {
            completion_api_key: completion?,
            maps_api_key: maps?,
        })
    }

    /// `(service, environment variable)` for each external service key.
    pub fn credential_env_vars(&self) -> [(&'static str, &str); 2] {
        [
            ("completion", self.completion.api_key_env.as_str()),
            ("maps", self.maps.api_key_env.as_str()),
        ]
    }
}

/// Value of `env_var` when it is set and not blank.
pub fn lookup_credential(env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
