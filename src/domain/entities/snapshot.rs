//! Schema snapshot entity

use std::sync::Arc;

use crate::domain::value_objects::Fingerprint;

/// Raw schema bytes paired with their fingerprint.
///
/// Bytes are reference counted so a snapshot can be handed to every
/// subscriber without copying the schema.
#[derive(Debug, Clone)]
pub struct Snapshot {
    bytes: Arc<[u8]>,
    fingerprint: Fingerprint,
    has_changed: bool,
}

impl Snapshot {
    /// Build a snapshot from freshly loaded bytes, comparing against the
    /// fingerprint of the snapshot it replaces (if any).
    pub fn load(bytes: Vec<u8>, previous: Option<&Fingerprint>) -> Self {
        let fingerprint = Fingerprint::of(&bytes);
        let has_changed = previous != Some(&fingerprint);
        Self {
            bytes: Arc::from(bytes),
            fingerprint,
            has_changed,
        }
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Whether the load that produced this snapshot saw new content
    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Snapshots compare by fingerprint only.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for Snapshot {}
