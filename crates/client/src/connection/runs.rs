//! Experiment run query operations.

use exptrack_core::tracking::{FindExperimentRuns, FindExperimentRunsResponse};

use super::Connection;
use crate::error::Result;
use crate::transport::Method;

pub const FIND_RUNS_PATH: &str = "/api/v1/modeldb/experiment-run/findExperimentRuns";

impl Connection {
    /// Fetch one page of runs.
    pub fn find_experiment_runs(
        &self,
        query: &FindExperimentRuns,
    ) -> Result<FindExperimentRunsResponse> {
        let resource = if query.experiment_id.is_empty() {
            "Experiment runs".to_string()
        } else {
            format!("Runs of experiment {}", query.experiment_id)
        };
        let response = self.send_message(Method::Post, FIND_RUNS_PATH, query, &resource)?;
        self.decode(&response)
    }
}
