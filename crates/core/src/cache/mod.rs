//! Snapshot cache for remote entities.
//!
//! The cache holds the last snapshot fetched from the server together with a
//! validity flag. Reads go through [`SnapshotCache::get_or_refresh`], which
//! refetches only when the flag is cleared. Mutations never patch the
//! snapshot; they call [`SnapshotCache::invalidate`] and let the next read
//! pick up the server's view.

mod snapshot;

pub use snapshot::{CacheState, SnapshotCache};
