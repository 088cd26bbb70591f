//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod checkpoint_store;
pub mod generation_invoker;
pub mod schema_source;

pub use checkpoint_store::CheckpointStore;
pub use generation_invoker::{GenerationInvoker, GenerationStatus};
pub use schema_source::SchemaSource;
