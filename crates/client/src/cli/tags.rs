//! Tag CLI commands.

use clap::{Parser, Subcommand};

/// Experiment tag commands.
#[derive(Debug, Parser)]
pub struct TagsCommand {
    #[command(subcommand)]
    pub action: TagsAction,
}

/// Available tag actions.
#[derive(Debug, Subcommand)]
pub enum TagsAction {
    /// Add tags to an experiment.
    Add {
        /// Experiment ID.
        id: String,
        /// Tags to add; duplicates are sent once.
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// List the tags of an experiment.
    List {
        /// Experiment ID.
        id: String,
    },
}
