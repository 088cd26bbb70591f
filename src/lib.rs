//! schema-sync - keep generated API clients in step with a schema file
//!
//! A server watches one schema file and pushes its bytes over WebSocket to
//! every connected client, once on connect and again whenever the content
//! fingerprint changes. Each client compares the payload's SHA-256 against a
//! persisted checkpoint and runs the code generator only on a mismatch.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    follow, AgentEvent, AgentOptions, Backoff, FollowOptions, SchemaWatcher, ServeUseCase,
    ServerEvent, SyncAgent, SyncOutcome,
};
pub use config::{Config, ConfigWarning};
pub use domain::entities::Snapshot;
pub use domain::value_objects::Fingerprint;
pub use error::{SchemaSyncError, SchemaSyncResult};
