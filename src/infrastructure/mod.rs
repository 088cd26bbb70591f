//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Schema file source, checkpoint file, change subscription
//! - `generator/` - External code generator subprocess
//! - `channel/` - WebSocket sync channel (server hub side and client)

pub mod channel;
pub mod fs;
pub mod generator;

// Re-export for convenience
pub use channel::{SyncChannel, SyncClient};
pub use fs::{FileCheckpointStore, FileSchemaSource, SchemaChanges};
pub use generator::CommandGenerator;
