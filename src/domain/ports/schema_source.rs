//! SchemaSource port - where the watcher loads schema bytes from

use async_trait::async_trait;

use crate::error::SchemaSyncResult;

/// Abstract schema source
///
/// Implementations:
/// - `FileSchemaSource` - reads the watched file from disk
/// - in-memory fakes in tests
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Read the full current content
    async fn read(&self) -> SchemaSyncResult<Vec<u8>>;

    /// Human-readable location used in events
    fn describe(&self) -> String;
}
