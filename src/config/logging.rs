//! `[logging]` section: verbosity, output format, and how much of a rider's
//! prompt may end up in request logs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Prompt preview length used when the file does not set one.
pub const DEFAULT_PROMPT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Levels for `route_planner::<component>` targets, e.g. `pipeline = "debug"`
    pub component_levels: BTreeMap<String, String>,
    /// Prompt previews in request logs, raw prompt and completion text at debug
    pub enable_content_logging: bool,
    /// Longest prompt preview, in characters
    pub prompt_preview_chars: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
            enable_content_logging: false,
            prompt_preview_chars: DEFAULT_PROMPT_PREVIEW_CHARS,
        }
    }
}

impl LoggingConfig {
    /// How many prompt characters a request log may carry; `None` when
    /// content logging is off.
    pub fn prompt_preview_limit(&self) -> Option<usize> {
        self.enable_content_logging
            .then_some(self.prompt_preview_chars)
    }

    /// Route a component's events at `level`, e.g. `("pipeline", "debug")`.
    pub fn with_component_level(mut self, component: &str, level: &str) -> Self {
        self.component_levels
            .insert(component.to_string(), level.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_prompts_out_of_logs() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.component_levels.is_empty());
        assert_eq!(config.prompt_preview_limit(), None);
    }

    #[test]
    fn test_preview_limit_follows_content_logging() {
        let config = LoggingConfig {
            enable_content_logging: true,
            prompt_preview_chars: 40,
            ..LoggingConfig::default()
        };
        assert_eq!(config.prompt_preview_limit(), Some(40));
    }

    #[test]
    fn test_logging_section_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            format = "json"
            enable_content_logging = true

            [component_levels]
            provider = "trace"
            pipeline = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.prompt_preview_limit(), Some(DEFAULT_PROMPT_PREVIEW_CHARS));
        let components: Vec<_> = config.component_levels.keys().collect();
        assert_eq!(components, vec!["pipeline", "provider"]);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
