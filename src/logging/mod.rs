//! Structured logging helpers
//!
//! Subscriber setup lives in `cli::serve`; this module holds the filter,
//! request ID and field helpers it and the API handlers share.

pub mod fields;

pub use fields::{new_request_id, prompt_preview, response_outcome};

use crate::config::LoggingConfig;

/// Build filter directives string from LoggingConfig
///
/// Produces the base level followed by one `route_planner::<component>=<level>`
/// directive per configured component.
///
/// # Examples
///
/// ```
/// use route_planner::config::LoggingConfig;
/// use route_planner::logging::build_filter_directives;
///
/// let config = LoggingConfig::default().with_component_level("pipeline", "debug");
///
/// assert_eq!(build_filter_directives(&config), "info,route_planner::pipeline=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",route_planner::{}={}", component, level));
    }

    filter_str
}
