// Error types for the backend clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the HTTP clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status from the backend
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// Body did not match the expected shape
    #[error("unexpected {endpoint} response: {detail}")]
    UnexpectedBody {
        endpoint: &'static str,
        detail: String,
    },

    /// Auth endpoint rejected the request with a reason
    #[error("auth rejected: {0}")]
    AuthRejected(String),
}

impl ClientError {
    pub fn status(endpoint: &'static str, status: reqwest::StatusCode) -> Self {
        ClientError::Status { endpoint, status }
    }

    pub fn body(endpoint: &'static str, detail: impl Into<String>) -> Self {
        ClientError::UnexpectedBody {
            endpoint,
            detail: detail.into(),
        }
    }
}
