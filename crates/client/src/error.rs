//! Client error types.

use exptrack_core::codec::CodecError;
use exptrack_core::tracking::ValidationError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid response: {0}")]
    Codec(#[from] CodecError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl ClientError {
    /// Returns true for a missing remote resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// Returns true for errors raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
