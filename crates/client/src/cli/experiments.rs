//! Experiment CLI commands.

use clap::{Parser, Subcommand};
use exptrack_core::tracking::KeyValue;

/// Experiment management commands.
#[derive(Debug, Parser)]
pub struct ExperimentsCommand {
    #[command(subcommand)]
    pub action: ExperimentsAction,
}

/// Available experiment actions.
#[derive(Debug, Subcommand)]
pub enum ExperimentsAction {
    /// Create a new experiment.
    Create {
        /// Owning project ID.
        #[arg(long)]
        project_id: String,
        /// Experiment name (generated when omitted).
        #[arg(long)]
        name: Option<String>,
        /// Experiment description.
        #[arg(long)]
        description: Option<String>,
        /// Tag to attach (repeatable).
        #[arg(long)]
        tag: Vec<String>,
        /// Attribute as KEY=VALUE; VALUE is parsed as JSON when possible (repeatable).
        #[arg(long, value_parser = parse_attribute)]
        attribute: Vec<KeyValue>,
        /// Reuse an existing experiment with the same name instead of failing.
        #[arg(long)]
        get_or_create: bool,
    },
    /// Get experiment by ID.
    Get {
        /// Experiment ID.
        id: String,
    },
    /// Get experiment by name within a project.
    GetByName {
        /// Owning project ID.
        #[arg(long)]
        project_id: String,
        /// Experiment name.
        name: String,
    },
    /// Delete experiment by ID.
    Delete {
        /// Experiment ID.
        id: String,
    },
}

/// Parses `KEY=VALUE`, reading VALUE as JSON and falling back to a plain string.
pub fn parse_attribute(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err("attribute key cannot be empty".to_string());
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok(KeyValue::new(key, value))
}
