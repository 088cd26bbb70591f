//! Application Layer
//!
//! Use cases that orchestrate the sync flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ServeUseCase` - Watches the schema and broadcasts it to subscribers
//! - `SyncAgent` - Deduplicates received payloads and regenerates bindings

pub mod agent;
pub mod watch;

pub use agent::{
    follow, AgentEvent, AgentOptions, Backoff, FollowOptions, SyncAgent, SyncOutcome,
};
pub use watch::{SchemaWatcher, ServeUseCase, ServerEvent};
