//! File-backed checkpoint store
//!
//! The checkpoint file holds the hex fingerprint as its entire content and is
//! overwritten, never appended.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ports::CheckpointStore;
use crate::domain::value_objects::Fingerprint;
use crate::error::{SchemaSyncError, SchemaSyncResult};

use super::writer::atomic_write_async;

/// Default checkpoint file name inside the output directory
pub const CHECKPOINT_FILE_NAME: &str = "HASH";

#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checkpoint stored as `HASH` inside the generator's output directory
    pub fn in_output_dir(output_dir: &Path) -> Self {
        Self::new(output_dir.join(CHECKPOINT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load(&self) -> SchemaSyncResult<Option<Fingerprint>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SchemaSyncError::CheckpointRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Fingerprint::parse(&content).map(Some)
    }

    async fn save(&self, fingerprint: &Fingerprint) -> SchemaSyncResult<()> {
        atomic_write_async(&self.path, fingerprint.as_str().as_bytes().to_vec())
            .await
            .map_err(|source| SchemaSyncError::CheckpointWrite {
                path: self.path.clone(),
                source,
            })
    }
}
