//! File-backed schema source

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ports::SchemaSource;
use crate::error::{SchemaSyncError, SchemaSyncResult};

/// Reads the watched schema file in full on every load
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    async fn read(&self) -> SchemaSyncResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| SchemaSyncError::SchemaRead {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
