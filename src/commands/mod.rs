//! Command implementations

pub mod fingerprint;
pub mod follow;
pub mod serve;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use schema_sync::application::agent::{AgentEvent, AgentOptions, SyncAgent};
use schema_sync::infrastructure::{CommandGenerator, FileCheckpointStore};
use schema_sync::Config;

use crate::ui::context::UiContext;

/// Single-threaded runtime; all server state lives on one task.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Token cancelled on the first Ctrl+C.
fn shutdown_on_ctrlc() -> Result<CancellationToken> {
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    ctrlc::set_handler(move || token.cancel()).context("failed to set Ctrl+C handler")?;
    Ok(shutdown)
}

type FileAgent = SyncAgent<FileCheckpointStore, CommandGenerator>;

/// Wire the agent from config, with `--output` taking precedence.
///
/// Under `--json` the generator's stdout is sent to stderr so stdout carries
/// only NDJSON events.
fn build_agent(config: &Config, output: Option<PathBuf>, ui: &UiContext) -> FileAgent {
    let mut client = config.client.clone();
    if let Some(dir) = output {
        client.output_dir = dir;
    }

    let generator = CommandGenerator::new(&config.generator.program, &config.generator.kind)
        .with_args(config.generator.args.clone())
        .with_stdout_to_stderr(ui.json);

    SyncAgent::new(
        AgentOptions {
            staging_path: client.staging_path(),
            output_dir: client.output_dir.clone(),
        },
        FileCheckpointStore::new(client.checkpoint_path()),
        generator,
    )
}

fn emit_agent_event(ui: &UiContext, event: &AgentEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let rendered = crate::ui::views::follow::render_agent_event(
        &crate::ui::clock(),
        event,
        ui.color,
        ui.unicode,
    );
    match event {
        AgentEvent::Error { .. } | AgentEvent::CheckpointUnreadable { .. } => {
            eprint!("{rendered}")
        }
        _ => print!("{rendered}"),
    }
}
