//! Domain Layer
//!
//! The sync protocol's values and the ports it talks through.
//!
//! ## Structure
//!
//! - `value_objects/` - `Fingerprint`
//! - `entities/` - `Snapshot`
//! - `ports/` - `SchemaSource`, `CheckpointStore`, `GenerationInvoker`
//!
//! Nothing in this layer touches the file system, the network or a process
//! directly; the `infrastructure` layer provides the implementations.

pub mod entities;
pub mod ports;
pub mod value_objects;
