use thiserror::Error;

/// Vendor error codes that indicate a transient server-side condition.
const RETRYABLE_CODES: &[&str] = &["InternalError", "RequestLimitExceeded"];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error (HTTP {status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Authentication failed")]
    Auth,

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Service unavailable, retry later")]
    ServiceUnavailable,
}

impl ApiError {
    /// Whether the request may be attempted again by the retry loop.
    ///
    /// Semantic failures (bad parameters, auth, unparseable payloads) are
    /// final; only transient transport and server-side conditions qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited | ApiError::ServiceUnavailable | ApiError::Timeout(_) => true,
            ApiError::Api { code, .. } => RETRYABLE_CODES.contains(&code.as_str()),
            _ => false,
        }
    }
}
