/// Whether a cached snapshot can be served without a refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// The snapshot reflects the last successful fetch.
    Valid,
    /// A mutation happened since the last fetch.
    Stale,
}

/// Last-fetched snapshot of a remote entity plus its validity flag.
///
/// The snapshot is replaced wholesale on refresh and never partially patched.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotCache<S> {
    snapshot: S,
    valid: bool,
}

impl<S> SnapshotCache<S> {
    /// Creates a valid cache around a freshly fetched snapshot.
    pub fn new(snapshot: S) -> Self {
        Self {
            snapshot,
            valid: true,
        }
    }

    /// Creates a cache that refetches on first read.
    pub fn stale(snapshot: S) -> Self {
        Self {
            snapshot,
            valid: false,
        }
    }

    pub fn state(&self) -> CacheState {
        if self.valid {
            CacheState::Valid
        } else {
            CacheState::Stale
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Marks the snapshot stale. Never touches the snapshot itself.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Replaces the snapshot and marks the cache valid.
    pub fn replace(&mut self, snapshot: S) {
        self.snapshot = snapshot;
        self.valid = true;
    }

    /// Returns the snapshot as last fetched, whether or not it is still valid.
    pub fn peek(&self) -> &S {
        &self.snapshot
    }

    /// Returns the snapshot, calling `refresh` first if the cache is stale.
    ///
    /// A failed refresh leaves both the snapshot and the stale flag untouched.
    pub fn get_or_refresh<E, F>(&mut self, refresh: F) -> Result<&S, E>
    where
        F: FnOnce() -> Result<S, E>,
    {
        if !self.valid {
            let snapshot = refresh()?;
            self.replace(snapshot);
        }
        Ok(&self.snapshot)
    }
}
