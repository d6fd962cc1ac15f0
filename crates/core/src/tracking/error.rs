use thiserror::Error;

/// Errors raised by local input validation, before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Tag cannot be empty")]
    EmptyTag,
    #[error("Tag must be a string, got {found}")]
    TagNotAString { found: &'static str },
    #[error("Tags must be a string or a list of strings, got {found}")]
    TagsNotAList { found: &'static str },
    #[error("Experiment name cannot be empty")]
    EmptyName,
    #[error("{field} cannot be empty")]
    EmptyId { field: &'static str },
    #[error("Attribute key cannot be empty")]
    EmptyAttributeKey,
    #[error("Unknown experiment field: {0}")]
    UnknownField(String),
    #[error("Page limit must be positive, got {0}")]
    InvalidPageLimit(i32),
}
