//! GenerationInvoker port - the external code generator

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::SchemaSyncResult;

/// Terminal status of a generator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStatus {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl GenerationStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for GenerationStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "signal"),
        }
    }
}

/// Abstract code generator
///
/// `Ok` means the run reached a terminal state, whatever its exit code.
/// `Err` means the generator never ran (e.g. executable not found).
#[async_trait]
pub trait GenerationInvoker: Send + Sync {
    async fn generate(&self, input: &Path, output_dir: &Path) -> SchemaSyncResult<GenerationStatus>;
}
