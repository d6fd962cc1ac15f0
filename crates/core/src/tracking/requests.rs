//! Request and response messages for the experiment endpoints.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.
//! Deletion has no message type here: its endpoint takes a bare `{"id": ...}` body.

use serde::{Deserialize, Serialize};

use super::types::{ExperimentRun, ExperimentSnapshot, KeyValue};
use crate::codec::impl_message;
use crate::serde::{deserialize_null_default, int64, is_zero};

/// Responses that wrap a single experiment.
///
/// Shared by the create, lookup and add-tags endpoints. A missing
/// `experiment` means the lookup matched nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExperimentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment: Option<ExperimentSnapshot>,
}

/// Looks up an experiment by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetExperimentById {
    pub id: String,
}

/// Looks up an experiment by name within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetExperimentByName {
    pub project_id: String,
    pub name: String,
}

/// Creates an experiment under a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExperiment {
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<KeyValue>,
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub date_created: i64,
}

/// Adds tags to an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExperimentTags {
    pub id: String,
    pub tags: Vec<String>,
}

/// Fetches the tags of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTags {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetTagsResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

/// Pages through runs, optionally scoped to a project and an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindExperimentRuns {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub experiment_id: String,
    /// One-based page index.
    pub page_number: i32,
    pub page_limit: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FindExperimentRunsResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub experiment_runs: Vec<ExperimentRun>,
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

impl_message!(
    ExperimentResponse,
    "ExperimentResponse",
    ["experiment"],
    nested { "experiment" => ExperimentSnapshot }
);
impl_message!(GetExperimentById, "GetExperimentById", ["id"]);
impl_message!(GetExperimentByName, "GetExperimentByName", ["project_id", "name"]);
impl_message!(
    CreateExperiment,
    "CreateExperiment",
    [
        "project_id",
        "name",
        "description",
        "tags",
        "attributes",
        "date_created",
    ],
    nested { "attributes" => KeyValue }
);
impl_message!(AddExperimentTags, "AddExperimentTags", ["id", "tags"]);
impl_message!(GetTags, "GetTags", ["id"]);
impl_message!(GetTagsResponse, "GetTags.Response", ["tags"]);
impl_message!(
    FindExperimentRuns,
    "FindExperimentRuns",
    ["project_id", "experiment_id", "page_number", "page_limit"]
);
impl_message!(
    FindExperimentRunsResponse,
    "FindExperimentRuns.Response",
    ["experiment_runs", "total_records"],
    nested { "experiment_runs" => ExperimentRun }
);
