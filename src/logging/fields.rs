//! Field helpers for structured logging

use uuid::Uuid;

/// Fresh id for one `/api/route` request span.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Short preview of a user prompt for request logs.
///
/// `limit` comes from [`LoggingConfig::prompt_preview_limit`]; `None` (content
/// logging off) or a blank prompt yields no preview. Truncation counts
/// characters, not bytes, so multi-byte text is never split mid-character.
///
/// # Examples
///
/// ```
/// use route_planner::logging::prompt_preview;
///
/// assert_eq!(prompt_preview("淀川沿いを走りたい", Some(3)).as_deref(), Some("淀川沿..."));
/// assert_eq!(prompt_preview("淀川沿いを走りたい", None), None);
/// ```
///
/// [`LoggingConfig::prompt_preview_limit`]: crate::config::LoggingConfig::prompt_preview_limit
pub fn prompt_preview(prompt: &str, limit: Option<usize>) -> Option<String> {
    let limit = limit?;
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }

    Some(truncate_chars(prompt, limit))
}

/// Outcome label for a finished request.
pub fn response_outcome(route_count: usize) -> &'static str {
    if route_count == 0 {
        "empty"
    } else {
        "ok"
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
