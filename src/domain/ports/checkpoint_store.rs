//! CheckpointStore port - persistence of the last applied fingerprint

use async_trait::async_trait;

use crate::domain::value_objects::Fingerprint;
use crate::error::SchemaSyncResult;

/// Abstract checkpoint persistence
///
/// Holds exactly one value: the fingerprint that last triggered (or
/// attempted) generation.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load the stored fingerprint. `Ok(None)` means no checkpoint exists.
    async fn load(&self) -> SchemaSyncResult<Option<Fingerprint>>;

    /// Overwrite the stored fingerprint
    async fn save(&self, fingerprint: &Fingerprint) -> SchemaSyncResult<()>;
}
