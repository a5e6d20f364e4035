//! Error types for the lookup client.

use thiserror::Error;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the service.
    #[error("http error {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// Service-level error (`code != 0` in the response envelope).
    #[error("api error {code}: {message}")]
    Api {
        /// Envelope error code.
        code: i64,
        /// Envelope message, or a placeholder when absent.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
