//! Experiment façade.

use std::fmt;

use chrono::{DateTime, Utc};
use exptrack_core::cache::{CacheState, SnapshotCache};
use exptrack_core::codec::Message;
use exptrack_core::tracking::{
    CreateExperiment, ExperimentSnapshot, KeyValue, TagList, ValidationError,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{Cacheable, ExperimentRuns, Identifiable, Taggable};
use crate::connection::{Connection, ProjectContext};
use crate::error::Result;

/// A machine learning experiment stored on the tracking service.
///
/// Field reads go through a cached snapshot. The snapshot is refetched only
/// after a mutation has marked it stale, so a read right after
/// [`log_tags`](Taggable::log_tags) always reflects the server's view.
pub struct Experiment {
    conn: Connection,
    id: String,
    cache: SnapshotCache<ExperimentSnapshot>,
}

/// Arguments for creating an experiment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewExperiment {
    name: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    attributes: Vec<KeyValue>,
    date_created: Option<DateTime<Utc>>,
}

impl NewExperiment {
    /// Arguments for an experiment with a generated default name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments for an experiment with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push(KeyValue::new(key, value));
        self
    }

    pub fn with_date_created(mut self, date_created: DateTime<Utc>) -> Self {
        self.date_created = Some(date_created);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when any argument beyond the name was supplied.
    pub fn has_creation_args(&self) -> bool {
        self.description.is_some()
            || !self.tags.is_empty()
            || !self.attributes.is_empty()
            || self.date_created.is_some()
    }

    /// Validates the arguments and builds the request body.
    pub fn into_request(self, project_id: &str) -> std::result::Result<CreateExperiment, ValidationError> {
        if project_id.is_empty() {
            return Err(ValidationError::EmptyId { field: "project_id" });
        }
        let name = match self.name {
            Some(name) if name.trim().is_empty() => return Err(ValidationError::EmptyName),
            Some(name) => name,
            None => Experiment::default_name(),
        };
        if self.attributes.iter().any(|attribute| attribute.key.is_empty()) {
            return Err(ValidationError::EmptyAttributeKey);
        }
        let tags = TagList::parse(&self.tags)?;

        Ok(CreateExperiment {
            project_id: project_id.to_string(),
            name,
            description: self.description.unwrap_or_default(),
            tags: tags.to_strings(),
            attributes: self.attributes,
            date_created: self
                .date_created
                .map(|date| date.timestamp_millis())
                .unwrap_or_default(),
        })
    }
}

impl Experiment {
    /// Binds a façade to a snapshot the caller already fetched.
    pub fn from_snapshot(conn: &Connection, snapshot: ExperimentSnapshot) -> Self {
        Self {
            conn: conn.clone(),
            id: snapshot.id.clone(),
            cache: SnapshotCache::new(snapshot),
        }
    }

    /// Looks up an experiment by id.
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(ValidationError::EmptyId { field: "id" }.into());
        }
        let snapshot = conn.get_experiment_by_id(id)?;
        Ok(Self::from_snapshot(conn, snapshot))
    }

    /// Looks up an experiment by name within a project.
    pub fn get_by_name(conn: &Connection, ctx: &ProjectContext, name: &str) -> Result<Self> {
        if ctx.project_id().is_empty() {
            return Err(ValidationError::EmptyId { field: "project_id" }.into());
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let snapshot = conn.get_experiment_by_name(ctx.project_id(), name)?;
        Ok(Self::from_snapshot(conn, snapshot))
    }

    /// Creates an experiment under the project.
    ///
    /// Logs a creation notice once the server has confirmed the experiment.
    pub fn create(conn: &Connection, ctx: &ProjectContext, new: NewExperiment) -> Result<Self> {
        let request = new.into_request(ctx.project_id())?;
        Self::create_from_request(conn, &request)
    }

    /// Binds to the experiment named in `new`, creating it if it does not exist.
    ///
    /// Creation-only arguments are ignored when the experiment already exists.
    pub fn get_or_create(conn: &Connection, ctx: &ProjectContext, new: NewExperiment) -> Result<Self> {
        let named = new.name().is_some();
        let has_creation_args = new.has_creation_args();
        let request = new.into_request(ctx.project_id())?;
        if !named {
            return Self::create_from_request(conn, &request);
        }

        match conn.get_experiment_by_name(&request.project_id, &request.name) {
            Ok(snapshot) => {
                if has_creation_args {
                    tracing::warn!(
                        name = %request.name,
                        "Experiment already exists; ignoring description, tags and attributes"
                    );
                }
                tracing::info!("set existing Experiment: {}", snapshot.name);
                Ok(Self::from_snapshot(conn, snapshot))
            }
            Err(err) if err.is_not_found() => Self::create_from_request(conn, &request),
            Err(err) => Err(err),
        }
    }

    fn create_from_request(conn: &Connection, request: &CreateExperiment) -> Result<Self> {
        let snapshot = conn.create_experiment(request)?;
        tracing::info!("created new Experiment: {}", snapshot.name);
        Ok(Self::from_snapshot(conn, snapshot))
    }

    /// Generates a name of the form `Expt <token>`.
    pub fn default_name() -> String {
        let token = Uuid::new_v4().simple().to_string();
        format!("Expt {}", &token[..8])
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn name(&mut self) -> Result<String> {
        Ok(self.snapshot()?.name.clone())
    }

    pub fn description(&mut self) -> Result<String> {
        Ok(self.snapshot()?.description.clone())
    }

    pub fn project_id(&mut self) -> Result<String> {
        Ok(self.snapshot()?.project_id.clone())
    }

    pub fn owner(&mut self) -> Result<String> {
        Ok(self.snapshot()?.owner.clone())
    }

    pub fn attributes(&mut self) -> Result<Vec<KeyValue>> {
        Ok(self.snapshot()?.attributes.clone())
    }

    pub fn date_created(&mut self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.snapshot()?.created_at())
    }

    pub fn date_updated(&mut self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.snapshot()?.updated_at())
    }

    /// Reads a snapshot field by its wire name, in its wire representation.
    ///
    /// Timestamps come back as decimal strings of epoch milliseconds, as on
    /// the wire. Unknown names fail with a validation error without touching the network.
    pub fn get_field(&mut self, name: &str) -> Result<Value> {
        if !ExperimentSnapshot::FIELDS.contains(&name) {
            return Err(ValidationError::UnknownField(name.to_string()).into());
        }
        let snapshot = self.snapshot()?;
        let value = match name {
            "id" => json!(snapshot.id),
            "project_id" => json!(snapshot.project_id),
            "name" => json!(snapshot.name),
            "description" => json!(snapshot.description),
            "date_created" => json!(snapshot.date_created.to_string()),
            "date_updated" => json!(snapshot.date_updated.to_string()),
            "tags" => json!(snapshot.tags),
            "attributes" => json!(snapshot.attributes),
            "owner" => json!(snapshot.owner),
            other => return Err(ValidationError::UnknownField(other.to_string()).into()),
        };
        Ok(value)
    }

    /// Runs in this experiment. Nothing is fetched until the query is used.
    pub fn list_runs(&self) -> ExperimentRuns {
        ExperimentRuns::new(&self.conn).with_experiment(self)
    }

    /// Deletes this experiment on the server.
    ///
    /// Not idempotent: a second call fails with [`ClientError::NotFound`](crate::ClientError::NotFound).
    pub fn delete(&mut self) -> Result<()> {
        let result = self.conn.delete_experiment(&self.id);
        self.invalidate();
        result
    }
}

impl Identifiable for Experiment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Cacheable for Experiment {
    type Snapshot = ExperimentSnapshot;

    fn refresh(&mut self) -> Result<()> {
        let snapshot = self.conn.get_experiment_by_id(&self.id)?;
        self.cache.replace(snapshot);
        Ok(())
    }

    fn invalidate(&mut self) {
        tracing::trace!(experiment_id = %self.id, "Invalidating experiment cache");
        self.cache.invalidate();
    }

    fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    fn snapshot(&mut self) -> Result<&ExperimentSnapshot> {
        let conn = &self.conn;
        let id = &self.id;
        if self.cache.is_valid() {
            tracing::trace!(experiment_id = %id, "Cache hit for experiment");
        } else {
            tracing::trace!(experiment_id = %id, "Cache miss for experiment");
        }
        self.cache.get_or_refresh(|| conn.get_experiment_by_id(id))
    }
}

impl Taggable for Experiment {
    fn add_tags(&mut self, tags: TagList) -> Result<()> {
        let result = self.conn.add_experiment_tags(&self.id, &tags);
        self.invalidate();
        result
    }

    fn get_tags(&self) -> Result<Vec<String>> {
        self.conn.get_experiment_tags(&self.id)
    }
}

/// Renders the name as last fetched, without refreshing.
impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.cache.peek(), f)
    }
}

impl fmt::Debug for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Experiment")
            .field("id", &self.id)
            .field("cache", &self.cache.state())
            .finish_non_exhaustive()
    }
}
