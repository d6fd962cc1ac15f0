//! exptrack_client - client and CLI for the experiment tracking API.
//!
//! Every call is a synchronous round trip. Entities cache a snapshot of their
//! remote fields, refetch it lazily after a mutation, and never update it in
//! place.

pub mod cli;
pub mod config;
pub mod connection;
pub mod entity;
pub mod error;
pub mod output;
pub mod transport;

pub use config::Config;
pub use connection::{Connection, ProjectContext};
pub use entity::{Cacheable, Experiment, ExperimentRuns, Identifiable, NewExperiment, Taggable};
pub use error::{ClientError, Result};
