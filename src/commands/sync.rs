use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use schema_sync::domain::ports::SchemaSource;
use schema_sync::infrastructure::FileSchemaSource;
use schema_sync::{AgentEvent, Config, SyncOutcome};

use crate::ui::context::UiContext;

/// Apply one local schema file with the same dedup and checkpoint rules as
/// `follow`. Fails when the generator cannot start or exits non-zero.
pub fn cmd_sync(
    config: Config,
    file: &Path,
    output: Option<PathBuf>,
    ui: &UiContext,
) -> Result<()> {
    let agent = super::build_agent(&config, output, ui);
    let source = FileSchemaSource::new(file);

    let outcome = super::runtime()?.block_on(async {
        let payload = source.read().await?;
        agent
            .handle_payload(&payload, &|event: AgentEvent| {
                super::emit_agent_event(ui, &event)
            })
            .await
    })?;

    match outcome {
        SyncOutcome::Generated { status, .. } if !status.success() => match status.code {
            Some(code) => bail!("generator exited with code {}", code),
            None => bail!("generator was terminated by a signal"),
        },
        _ => Ok(()),
    }
}
