use thiserror::Error;

/// Errors that can occur while converting between messages and wire JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("{message} must be encoded as a JSON object, got {found}")]
    NotAnObject {
        message: &'static str,
        found: &'static str,
    },
    #[error("{message} has unknown fields: {}", fields.join(", "))]
    UnknownFields {
        message: &'static str,
        fields: Vec<String>,
    },
    #[error("{message} does not match its schema: {reason}")]
    Schema {
        message: &'static str,
        reason: String,
    },
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
