//! External code generator invoked as a subprocess

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::ports::{GenerationInvoker, GenerationStatus};
use crate::error::{SchemaSyncError, SchemaSyncResult};

pub const DEFAULT_GENERATOR_PROGRAM: &str = "openapi-generator";
pub const DEFAULT_GENERATOR_KIND: &str = "typescript-fetch";

/// Runs `<program> generate -i <input> -g <kind> -o <output> [args...]`.
///
/// Stdout and stderr are inherited so the generator's output streams live to
/// the agent's console. With [`with_stdout_to_stderr`](Self::with_stdout_to_stderr)
/// the child's stdout goes to our stderr instead, keeping stdout free for
/// machine-readable output.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    kind: String,
    args: Vec<String>,
    stdout_to_stderr: bool,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            kind: kind.into(),
            args: Vec::new(),
            stdout_to_stderr: false,
        }
    }

    /// Extra arguments appended after the standard flags
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Route the child's stdout to this process's stderr
    pub fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for an invocation
    pub fn arguments(&self, input: &Path, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "generate".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-g".to_string(),
            self.kind.clone(),
            "-o".to_string(),
            output_dir.display().to_string(),
        ];
        args.extend(self.args.iter().cloned());
        args
    }
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR_PROGRAM, DEFAULT_GENERATOR_KIND)
    }
}

#[async_trait]
impl GenerationInvoker for CommandGenerator {
    async fn generate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> SchemaSyncResult<GenerationStatus> {
        let args = self.arguments(input, output_dir);
        tracing::debug!(program = %self.program, ?args, "spawning generator");

        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| SchemaSyncError::GeneratorSpawn {
                program: self.program.clone(),
                source,
            })?;

        // Once spawned, the run has been attempted; a wait failure is
        // reported as a terminal status without an exit code.
        let status = match child.wait().await {
            Ok(status) => GenerationStatus::from(status),
            Err(e) => {
                tracing::warn!(
                    program = %self.program,
                    error = %e,
                    "failed waiting for generator"
                );
                GenerationStatus { code: None }
            }
        };

        Ok(status)
    }
}
