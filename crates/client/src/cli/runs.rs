//! Run CLI commands.

use clap::{Parser, Subcommand};

/// Commands over runs within an experiment.
#[derive(Debug, Parser)]
pub struct RunsCommand {
    #[command(subcommand)]
    pub action: RunsAction,
}

/// Available run actions.
#[derive(Debug, Subcommand)]
pub enum RunsAction {
    /// List every run in an experiment.
    List {
        /// Experiment ID.
        experiment_id: String,
        /// Runs fetched per request.
        #[arg(long, default_value = "100")]
        page_limit: i32,
    },
}
