//! Output formatting for the CLI: compact JSON or human-readable text.

pub mod json;
pub mod pretty;
