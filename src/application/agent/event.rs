//! Agent event types for NDJSON and console output

/// Events emitted by the client sync agent
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    AgentStarted {
        url: String,
        output_dir: String,
    },
    Connected {
        url: String,
    },
    Disconnected {
        url: String,
        retry_in_ms: u64,
    },
    ConnectFailed {
        url: String,
        message: String,
        retry_in_ms: u64,
    },
    NoChange {
        fingerprint: String,
    },
    ChangeDetected {
        fingerprint: String,
        previous: Option<String>,
    },
    GenerationComplete {
        fingerprint: String,
        code: Option<i32>,
        success: bool,
        elapsed_ms: u64,
    },
    CheckpointUnreadable {
        message: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl AgentEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
