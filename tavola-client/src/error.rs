//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Login rejected by the server (message comes from the response body)
    #[error("{0}")]
    LoginRejected(String),

    /// A login attempt is already in flight
    #[error("Login already in progress")]
    LoginInFlight,

    /// Authentication required (401 from an authorized call)
    #[error("Authentication required")]
    Unauthorized,

    /// Storage I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
