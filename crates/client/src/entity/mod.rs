//! Remote entity façades.
//!
//! Each entity kind implements the capabilities it supports instead of
//! inheriting from a common base:
//!
//! - [`Identifiable`]: has a server-assigned id.
//! - [`Cacheable`]: keeps a lazily refreshed snapshot of its remote fields.
//! - [`Taggable`]: carries a server-side tag set.

pub mod experiment;
pub mod runs;

pub use experiment::{Experiment, NewExperiment};
pub use runs::{ExperimentRuns, RunPage};

use exptrack_core::cache::CacheState;
use exptrack_core::tracking::{Tag, TagList};

use crate::error::{ClientError, Result};

/// An entity addressed by an opaque server-assigned id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// An entity whose fields are served from a cached snapshot.
pub trait Cacheable {
    type Snapshot;

    /// Fetches the snapshot by id and marks the cache valid.
    fn refresh(&mut self) -> Result<()>;

    /// Marks the snapshot stale without any remote call.
    fn invalidate(&mut self);

    fn cache_state(&self) -> CacheState;

    /// Returns the snapshot, refreshing it first if stale.
    fn snapshot(&mut self) -> Result<&Self::Snapshot>;
}

/// An entity with a server-side tag set.
pub trait Taggable: Identifiable {
    /// Sends already-validated tags in one request and marks the snapshot stale.
    fn add_tags(&mut self, tags: TagList) -> Result<()>;

    /// Adds tags in one request, after validating and de-duplicating them.
    fn log_tags<T>(&mut self, tags: T) -> Result<()>
    where
        T: TryInto<TagList>,
        ClientError: From<T::Error>,
    {
        let tags: TagList = tags.try_into()?;
        self.add_tags(tags)
    }

    /// Adds a single tag. Equivalent to `log_tags([tag])`.
    fn log_tag<T>(&mut self, tag: T) -> Result<()>
    where
        T: TryInto<Tag>,
        ClientError: From<T::Error>,
    {
        let tag: Tag = tag.try_into()?;
        self.add_tags(TagList::from(tag))
    }

    /// Fetches the current tags from the server. Never served from cache.
    fn get_tags(&self) -> Result<Vec<String>>;
}
