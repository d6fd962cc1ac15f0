//! Lazy query over experiment runs.

use exptrack_core::tracking::{ExperimentRun, FindExperimentRuns, ValidationError};

use super::Identifiable;
use crate::connection::{Connection, ProjectContext};
use crate::error::Result;

/// Page size used when none is set.
pub const DEFAULT_PAGE_LIMIT: i32 = 100;

/// One page of a run query.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPage {
    pub runs: Vec<ExperimentRun>,
    /// Total matches across all pages.
    pub total_records: i64,
}

/// Query over runs, optionally scoped to a project and an experiment.
///
/// Building and scoping a query performs no requests; only [`fetch_page`]
/// and [`fetch_all`] talk to the server.
///
/// [`fetch_page`]: ExperimentRuns::fetch_page
/// [`fetch_all`]: ExperimentRuns::fetch_all
#[derive(Debug, Clone)]
pub struct ExperimentRuns {
    conn: Connection,
    project_id: Option<String>,
    experiment_id: Option<String>,
    page_limit: i32,
}

impl ExperimentRuns {
    pub fn new(conn: &Connection) -> Self {
        Self {
            conn: conn.clone(),
            project_id: None,
            experiment_id: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Restricts the query to a project.
    pub fn with_project(mut self, ctx: &ProjectContext) -> Self {
        self.project_id = Some(ctx.project_id().to_string());
        self
    }

    /// Restricts the query to an experiment.
    pub fn with_experiment(self, experiment: &impl Identifiable) -> Self {
        self.with_experiment_id(experiment.id())
    }

    pub fn with_experiment_id(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = Some(experiment_id.into());
        self
    }

    pub fn with_page_limit(mut self, page_limit: i32) -> Result<Self> {
        if page_limit <= 0 {
            return Err(ValidationError::InvalidPageLimit(page_limit).into());
        }
        self.page_limit = page_limit;
        Ok(self)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn experiment_id(&self) -> Option<&str> {
        self.experiment_id.as_deref()
    }

    pub fn page_limit(&self) -> i32 {
        self.page_limit
    }

    /// Fetches one page. Pages are numbered from 1.
    pub fn fetch_page(&self, page_number: i32) -> Result<RunPage> {
        let query = FindExperimentRuns {
            project_id: self.project_id.clone().unwrap_or_default(),
            experiment_id: self.experiment_id.clone().unwrap_or_default(),
            page_number,
            page_limit: self.page_limit,
        };
        let response = self.conn.find_experiment_runs(&query)?;
        Ok(RunPage {
            runs: response.experiment_runs,
            total_records: response.total_records,
        })
    }

    /// Fetches every page until `total_records` runs have been collected.
    pub fn fetch_all(&self) -> Result<Vec<ExperimentRun>> {
        let mut runs = Vec::new();
        let mut page_number = 1;
        loop {
            let page = self.fetch_page(page_number)?;
            let received = page.runs.len();
            runs.extend(page.runs);
            tracing::debug!(
                page = page_number,
                received,
                total = page.total_records,
                "Fetched page of experiment runs"
            );
            if received == 0 || runs.len() as i64 >= page.total_records {
                break;
            }
            page_number += 1;
        }
        Ok(runs)
    }
}
