//! Server-side snapshot cache

use crate::domain::entities::Snapshot;
use crate::domain::ports::SchemaSource;
use crate::error::SchemaSyncResult;

/// Owns the single most recent [`Snapshot`] of the watched schema.
///
/// Serves every subscriber from the cache so the file is not re-read per
/// connection; only a forced load touches the source again.
pub struct SchemaWatcher<S> {
    source: S,
    cache: Option<Snapshot>,
}

impl<S: SchemaSource> SchemaWatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached snapshot, if any load has succeeded yet
    pub fn cached(&self) -> Option<&Snapshot> {
        self.cache.as_ref()
    }

    /// Return the cached snapshot, loading it first when the cache is empty
    /// or `force` is set.
    ///
    /// A failed load leaves the previous cache in place.
    pub async fn get_schema(&mut self, force: bool) -> SchemaSyncResult<&Snapshot> {
        if force {
            return self.reload().await;
        }
        match self.cache {
            Some(ref snapshot) => Ok(snapshot),
            None => self.reload().await,
        }
    }

    async fn reload(&mut self) -> SchemaSyncResult<&Snapshot> {
        let bytes = self.source.read().await?;
        let snapshot = Snapshot::load(bytes, self.cache.as_ref().map(Snapshot::fingerprint));
        Ok(self.cache.insert(snapshot))
    }
}
