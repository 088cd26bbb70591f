//! Error types for schema-sync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema-sync operations
pub type SchemaSyncResult<T> = Result<T, SchemaSyncError>;

/// Main error type for schema-sync operations
#[derive(Error, Debug)]
pub enum SchemaSyncError {
    /// The watched schema file could not be read
    #[error("failed to read schema {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The received payload could not be written to the staging location
    #[error("failed to stage schema at {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint file exists but could not be read
    #[error("failed to read checkpoint {path}: {source}")]
    CheckpointRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checkpoint file could not be written
    #[error("failed to write checkpoint {path}: {source}")]
    CheckpointWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A string that should hold a hex SHA-256 digest does not
    #[error("invalid fingerprint '{value}': expected 64 hex characters")]
    InvalidFingerprint { value: String },

    /// The code generator could not be started at all
    #[error("failed to spawn generator '{program}': {source}")]
    GeneratorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem notification setup failed
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The server could not bind its listening socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// WebSocket transport error
    #[error("websocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for SchemaSyncError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        SchemaSyncError::WebSocket(Box::new(err))
    }
}
