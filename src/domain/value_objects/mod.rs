//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod fingerprint;

pub use fingerprint::Fingerprint;
