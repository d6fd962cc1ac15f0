//! exptrack-client CLI entry point.

use clap::Parser;
use exptrack_client::cli::experiments::ExperimentsAction;
use exptrack_client::cli::runs::RunsAction;
use exptrack_client::cli::tags::TagsAction;
use exptrack_client::cli::{Cli, Commands, OutputFormat};
use exptrack_client::output::{json, pretty};
use exptrack_client::{
    Cacheable, Connection, Experiment, ExperimentRuns, NewExperiment, ProjectContext, Taggable,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "exptrack_client=warn"
    } else {
        "exptrack_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let conn = Connection::new(&cli.config()?);

    match cli.command {
        Commands::Experiments(experiments_cmd) => match experiments_cmd.action {
            ExperimentsAction::Create {
                project_id,
                name,
                description,
                tag,
                attribute,
                get_or_create,
            } => {
                let mut new = match name {
                    Some(name) => NewExperiment::named(name),
                    None => NewExperiment::new(),
                };
                if let Some(description) = description {
                    new = new.with_description(description);
                }
                if !tag.is_empty() {
                    new = new.with_tags(tag);
                }
                for kv in attribute {
                    new = new.with_attribute(kv.key, kv.value);
                }

                let ctx = ProjectContext::new(project_id);
                let mut experiment = if get_or_create {
                    Experiment::get_or_create(&conn, &ctx, new)?
                } else {
                    Experiment::create(&conn, &ctx, new)?
                };
                let snapshot = experiment.snapshot()?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(snapshot)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_experiment(snapshot))
                    }
                }
            }
            ExperimentsAction::Get { id } => {
                let mut experiment = Experiment::get_by_id(&conn, &id)?;
                let snapshot = experiment.snapshot()?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(snapshot)),
                    OutputFormat::Pretty => println!("{}", pretty::format_experiment(snapshot)),
                }
            }
            ExperimentsAction::GetByName { project_id, name } => {
                let ctx = ProjectContext::new(project_id);
                let mut experiment = Experiment::get_by_name(&conn, &ctx, &name)?;
                let snapshot = experiment.snapshot()?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(snapshot)),
                    OutputFormat::Pretty => println!("{}", pretty::format_experiment(snapshot)),
                }
            }
            ExperimentsAction::Delete { id } => {
                let mut experiment = Experiment::get_by_id(&conn, &id)?;
                experiment.delete()?;
                if !cli.quiet {
                    println!("Deleted experiment {}", id);
                }
            }
        },
        Commands::Tags(tags_cmd) => match tags_cmd.action {
            TagsAction::Add { id, tags } => {
                let mut experiment = Experiment::get_by_id(&conn, &id)?;
                experiment.log_tags(tags)?;
                if !cli.quiet {
                    println!("Tagged experiment {}", id);
                }
            }
            TagsAction::List { id } => {
                let experiment = Experiment::get_by_id(&conn, &id)?;
                let tags = experiment.get_tags()?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(&tags)),
                    OutputFormat::Pretty => println!("{}", pretty::format_tags(&tags)),
                }
            }
        },
        Commands::Runs(runs_cmd) => match runs_cmd.action {
            RunsAction::List {
                experiment_id,
                page_limit,
            } => {
                let runs = ExperimentRuns::new(&conn)
                    .with_experiment_id(experiment_id)
                    .with_page_limit(page_limit)?
                    .fetch_all()?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(&runs)),
                    OutputFormat::Pretty => println!("{}", pretty::format_runs(&runs)),
                }
            }
        },
    }

    Ok(())
}
