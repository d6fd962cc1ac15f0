//! Pretty output formatting.

use chrono::{DateTime, Utc};
use exptrack_core::tracking::{ExperimentRun, ExperimentSnapshot};

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> Option<String> {
    timestamp.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Format an experiment for display.
pub fn format_experiment(experiment: &ExperimentSnapshot) -> String {
    let mut output = format!("{}\n  ID: {}", experiment.name, experiment.id);
    if !experiment.project_id.is_empty() {
        output.push_str(&format!("\n  Project: {}", experiment.project_id));
    }
    if !experiment.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", experiment.description));
    }
    if !experiment.tags.is_empty() {
        output.push_str(&format!("\n  Tags: {}", experiment.tags.join(", ")));
    }
    for attribute in &experiment.attributes {
        output.push_str(&format!("\n  {} = {}", attribute.key, attribute.value));
    }
    if let Some(created) = format_timestamp(experiment.created_at()) {
        output.push_str(&format!("\n  Created: {}", created));
    }
    output
}

/// Format tags for display.
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found.".to_string();
    }
    let mut sorted = tags.to_vec();
    sorted.sort();
    let mut output = format!("TAGS ({})\n", sorted.len());
    output.push_str(&"-".repeat(40));
    for tag in sorted {
        output.push_str(&format!("\n{}", tag));
    }
    output
}

/// Format a run for display.
pub fn format_run(run: &ExperimentRun) -> String {
    let mut output = format!("{}\n  ID: {}", run.name, run.id);
    if !run.tags.is_empty() {
        output.push_str(&format!("\n  Tags: {}", run.tags.join(", ")));
    }
    if let Some(created) = format_timestamp(run.created_at()) {
        output.push_str(&format!("\n  Created: {}", created));
    }
    output
}

/// Format runs for display.
pub fn format_runs(runs: &[ExperimentRun]) -> String {
    if runs.is_empty() {
        return "No runs found.".to_string();
    }
    let mut output = format!("RUNS ({})\n", runs.len());
    output.push_str(&"-".repeat(40));
    for run in runs {
        output.push_str(&format!("\n{}", format_run(run)));
        output.push('\n');
    }
    output
}
