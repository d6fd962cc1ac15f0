//! CLI command definitions.

pub mod experiments;
pub mod runs;
pub mod tags;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::error::Result;

/// CLI client for the experiment tracking API.
#[derive(Debug, Parser)]
#[command(name = "exptrack-client")]
#[command(about = "CLI client for the experiment tracking API", long_about = None)]
pub struct Cli {
    /// Service host, optionally prefixed with http:// or https://.
    #[arg(long, env = "EXPTRACK_HOST", default_value = "localhost:3000")]
    pub host: String,

    /// Scheme used when the host has no `http://` or `https://` prefix.
    #[arg(long, env = "EXPTRACK_SCHEME", default_value = "http")]
    pub scheme: String,

    /// Account email sent with every request.
    #[arg(long, env = "EXPTRACK_EMAIL")]
    pub email: Option<String>,

    /// Developer key sent with every request.
    #[arg(long, env = "EXPTRACK_DEV_KEY", hide_env_values = true)]
    pub dev_key: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Builds the client configuration from the global flags.
    pub fn config(&self) -> Result<Config> {
        let config = Config::with_default_scheme(&self.host, &self.scheme)?;
        Ok(match (&self.email, &self.dev_key) {
            (Some(email), Some(dev_key)) => config.with_credentials(email, dev_key),
            _ => config,
        })
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Experiment management.
    Experiments(experiments::ExperimentsCommand),
    /// Experiment tags.
    Tags(tags::TagsCommand),
    /// Runs within an experiment.
    Runs(runs::RunsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_command() {
        let cli = Cli::try_parse_from([
            "exptrack-client",
            "--host",
            "https://track.example.com",
            "experiments",
            "create",
            "--project-id",
            "p1",
            "--name",
            "Expt 1",
            "--tag",
            "a",
            "--tag",
            "b",
            "--attribute",
            "lr=0.01",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert_eq!(config.scheme, "https");
        match cli.command {
            Commands::Experiments(cmd) => match cmd.action {
                experiments::ExperimentsAction::Create {
                    project_id,
                    name,
                    tag,
                    attribute,
                    ..
                } => {
                    assert_eq!(project_id, "p1");
                    assert_eq!(name.as_deref(), Some("Expt 1"));
                    assert_eq!(tag, vec!["a", "b"]);
                    assert_eq!(attribute[0].key, "lr");
                    assert_eq!(attribute[0].value, serde_json::json!(0.01));
                }
                other => panic!("unexpected action {other:?}"),
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_scheme_flag_applies_to_bare_host() {
        let cli = Cli::try_parse_from([
            "exptrack-client",
            "--scheme",
            "https",
            "--host",
            "track.example.com",
            "tags",
            "list",
            "e-1",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert_eq!(config.scheme, "https");
        assert_eq!(config.host, "track.example.com");
    }

    #[test]
    fn test_host_prefix_overrides_scheme_flag() {
        let cli = Cli::try_parse_from([
            "exptrack-client",
            "--scheme",
            "https",
            "--host",
            "http://localhost:8080",
            "runs",
            "list",
            "e-1",
        ])
        .unwrap();

        assert_eq!(cli.config().unwrap().scheme, "http");
    }

    #[test]
    fn test_unsupported_scheme_flag_is_config_error() {
        let cli = Cli::try_parse_from([
            "exptrack-client",
            "--scheme",
            "ftp",
            "--host",
            "track.example.com",
            "tags",
            "list",
            "e-1",
        ])
        .unwrap();

        assert!(matches!(
            cli.config(),
            Err(crate::error::ClientError::Config(_))
        ));
    }

    #[test]
    fn test_credentials_need_both_flags() {
        let cli = Cli::try_parse_from([
            "exptrack-client",
            "--email",
            "ada@example.com",
            "tags",
            "list",
            "e-1",
        ])
        .unwrap();
        assert!(cli.config().unwrap().auth_headers().is_empty());
    }
}
