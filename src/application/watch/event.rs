//! Server event types for NDJSON and console output

/// Events emitted by the schema server
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    ServerStarted {
        schema: String,
        address: String,
    },
    ClientConnected {
        id: u64,
        peer: String,
        clients: usize,
    },
    ClientDisconnected {
        id: u64,
        peer: String,
        clients: usize,
    },
    SnapshotSent {
        id: u64,
        fingerprint: String,
        bytes: usize,
    },
    SchemaChanged {
        fingerprint: String,
        bytes: usize,
        delivered: usize,
        pruned: usize,
    },
    NoChange {
        fingerprint: String,
    },
    Error {
        message: String,
    },
    Shutdown {
        closed: usize,
    },
}

impl ServerEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
