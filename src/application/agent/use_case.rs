//! Payload handling: dedup against the checkpoint, then regenerate

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::domain::ports::{CheckpointStore, GenerationInvoker, GenerationStatus};
use crate::domain::value_objects::Fingerprint;
use crate::error::{SchemaSyncError, SchemaSyncResult};
use crate::infrastructure::fs::atomic_write_async;

use super::event::AgentEvent;

/// Where payloads are staged and generated code is written
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Scratch file the generator reads
    pub staging_path: PathBuf,
    /// Generator output directory
    pub output_dir: PathBuf,
}

/// Result of handling one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fingerprint matched the checkpoint; generation skipped
    Unchanged { fingerprint: Fingerprint },
    /// Generator ran to a terminal state and the checkpoint was updated
    Generated {
        fingerprint: Fingerprint,
        status: GenerationStatus,
        elapsed: Duration,
    },
}

impl SyncOutcome {
    pub fn fingerprint(&self) -> &Fingerprint {
        match self {
            SyncOutcome::Unchanged { fingerprint } | SyncOutcome::Generated { fingerprint, .. } => {
                fingerprint
            }
        }
    }

    pub fn generated(&self) -> bool {
        matches!(self, SyncOutcome::Generated { .. })
    }
}

/// Client Sync Agent
///
/// Invokes the generator at most once per received change. The checkpoint
/// records "attempted", not "verified": it is written after any terminal
/// generator status, and never when the generator could not be started.
pub struct SyncAgent<C, G> {
    options: AgentOptions,
    checkpoint: C,
    generator: G,
}

impl<C: CheckpointStore, G: GenerationInvoker> SyncAgent<C, G> {
    pub fn new(options: AgentOptions, checkpoint: C, generator: G) -> Self {
        Self {
            options,
            checkpoint,
            generator,
        }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn checkpoint(&self) -> &C {
        &self.checkpoint
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Handle one whole-schema payload.
    pub async fn handle_payload<F>(
        &self,
        payload: &[u8],
        on_event: &F,
    ) -> SchemaSyncResult<SyncOutcome>
    where
        F: Fn(AgentEvent),
    {
        let fingerprint = Fingerprint::of(payload);
        let previous = self.last_applied(on_event).await;

        if previous.as_ref() == Some(&fingerprint) {
            on_event(AgentEvent::NoChange {
                fingerprint: fingerprint.to_string(),
            });
            return Ok(SyncOutcome::Unchanged { fingerprint });
        }

        on_event(AgentEvent::ChangeDetected {
            fingerprint: fingerprint.to_string(),
            previous: previous.map(|p| p.to_string()),
        });

        let start = Instant::now();

        atomic_write_async(&self.options.staging_path, payload.to_vec())
            .await
            .map_err(|source| SchemaSyncError::Staging {
                path: self.options.staging_path.clone(),
                source,
            })?;

        let status = self
            .generator
            .generate(&self.options.staging_path, &self.options.output_dir)
            .await?;

        self.checkpoint.save(&fingerprint).await?;

        let elapsed = start.elapsed();
        on_event(AgentEvent::GenerationComplete {
            fingerprint: fingerprint.to_string(),
            code: status.code,
            success: status.success(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });

        Ok(SyncOutcome::Generated {
            fingerprint,
            status,
            elapsed,
        })
    }

    /// Read the checkpoint, treating any failure as "no prior fingerprint".
    async fn last_applied<F>(&self, on_event: &F) -> Option<Fingerprint>
    where
        F: Fn(AgentEvent),
    {
        match self.checkpoint.load().await {
            Ok(previous) => previous,
            Err(e) => {
                on_event(AgentEvent::CheckpointUnreadable {
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
