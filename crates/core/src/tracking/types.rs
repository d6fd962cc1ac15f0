use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::impl_message;
use crate::serde::{deserialize_null_default, int64, is_zero};

/// A key/value attribute attached to an entity. Values are arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Server-side snapshot of an experiment.
///
/// Only `id` is required on the wire; every other field decodes to its zero
/// value when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSnapshot {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub date_created: i64,
    /// Milliseconds since the Unix epoch.
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub date_updated: i64,
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attributes: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
}

impl ExperimentSnapshot {
    /// Creates a snapshot with only an id and a name set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: String::new(),
            name: name.into(),
            description: String::new(),
            date_created: 0,
            date_updated: 0,
            tags: Vec::new(),
            attributes: Vec::new(),
            owner: String::new(),
        }
    }

    /// Sets the owning project id (useful for testing).
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Sets the tags (useful for testing).
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Creation time, if the server reported one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.date_created)
    }

    /// Last update time, if the server reported one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.date_updated)
    }

    /// Looks up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| &attribute.value)
    }
}

impl fmt::Display for ExperimentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Experiment \"{}\">", self.name)
    }
}

/// Summary of a run within an experiment, as returned by run queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub experiment_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub date_created: i64,
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

impl ExperimentRun {
    /// Creation time, if the server reported one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.date_created)
    }
}

impl fmt::Display for ExperimentRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ExperimentRun \"{}\">", self.name)
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        None
    } else {
        DateTime::from_timestamp_millis(millis)
    }
}

impl_message!(KeyValue, "KeyValue", ["key", "value", "value_type"]);
impl_message!(
    ExperimentSnapshot,
    "Experiment",
    [
        "id",
        "project_id",
        "name",
        "description",
        "date_created",
        "date_updated",
        "tags",
        "attributes",
        "owner",
    ],
    nested { "attributes" => KeyValue }
);
impl_message!(
    ExperimentRun,
    "ExperimentRun",
    [
        "id",
        "project_id",
        "experiment_id",
        "name",
        "description",
        "date_created",
        "tags",
    ]
);
