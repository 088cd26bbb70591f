//! Agent Use Case (client side)
//!
//! Receives schema payloads, deduplicates them against the persisted
//! checkpoint and regenerates client bindings only when the fingerprint
//! changed.
//!
//! ## Architecture
//!
//! - `SyncAgent` - Handles one payload: hash, compare, stage, generate, persist
//! - `follow` - Connection loop with reconnect backoff
//! - `AgentEvent` - Events emitted while following

mod event;
mod follow;
mod use_case;


pub use event::AgentEvent;
pub use follow::{follow, Backoff, FollowOptions, RECONNECT_INITIAL_MS, RECONNECT_MAX_MS};
pub use use_case::{AgentOptions, SyncAgent, SyncOutcome};
