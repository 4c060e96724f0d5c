//! Error types for the transport layer.

use thiserror::Error;

// =============================================================================
// API Errors
// =============================================================================

/// Errors from calls to the Messaging API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The platform answered with a non-2xx status.
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the platform.
        body: String,
    },

    /// Failed to serialize the request body.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors from setting up or running the transport.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error (bind failure, socket error).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for Messaging API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
