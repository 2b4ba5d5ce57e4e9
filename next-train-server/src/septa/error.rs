//! Arrivals feed error types.

/// Errors from fetching arrivals.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock data could not be read from disk
    #[error("mock data error: {0}")]
    Mock(String),

    /// Client could not be constructed
    #[error("not configured: {0}")]
    NotConfigured(String),
}
