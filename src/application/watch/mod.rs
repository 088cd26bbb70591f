//! Watch Use Case (server side)
//!
//! Watches one schema file and pushes its content to every connected client.
//! It orchestrates:
//! - File change notifications (via `notify`, debounced)
//! - The snapshot cache and its `has_changed` flag, which suppresses
//!   broadcasts for no-op writes
//! - The immediate post-connect send that re-syncs reconnecting clients
//!
//! ## Architecture
//!
//! - `SchemaWatcher` - Owns the cached snapshot
//! - `ServeUseCase` - Hub loop owning the watcher and the subscriber set
//! - `ServerEvent` - Events emitted during serving

mod cache;
mod event;
mod use_case;


pub use cache::SchemaWatcher;
pub use event::ServerEvent;
pub use use_case::ServeUseCase;
