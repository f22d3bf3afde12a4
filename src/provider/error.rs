//! Error types for provider calls.

use thiserror::Error;

/// Errors that can occur while talking to an external service.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Service error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Service answered 200 but reported a failure status in the body
    /// (e.g. Google's `REQUEST_DENIED`, `OVER_QUERY_LIMIT`).
    #[error("Service status {status}: {message}")]
    Status { status: String, message: String },

    /// Response doesn't match expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map a reqwest send error, distinguishing timeouts.
    pub(crate) fn from_send(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout_ms)
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}
