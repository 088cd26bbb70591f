//! Domain Entities

mod snapshot;

pub use snapshot::Snapshot;
