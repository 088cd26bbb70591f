//! File System Implementations
//!
//! Concrete implementations of the schema source and checkpoint ports, plus
//! the filesystem change subscription.

mod changes;
mod checkpoint;
mod schema_file;
pub mod writer;

pub use changes::{ChangeTrigger, SchemaChange, SchemaChanges, DEFAULT_DEBOUNCE_MS};
pub use checkpoint::{FileCheckpointStore, CHECKPOINT_FILE_NAME};
pub use schema_file::FileSchemaSource;
pub use writer::{atomic_write, atomic_write_async};
