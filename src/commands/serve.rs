use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use schema_sync::application::watch::{ServeUseCase, ServerEvent};
use schema_sync::infrastructure::{FileSchemaSource, SchemaChanges, SyncChannel};
use schema_sync::Config;

use crate::ui::context::UiContext;

pub fn cmd_serve(
    config: Config,
    schema: Option<PathBuf>,
    bind: Option<String>,
    ui: &UiContext,
) -> Result<()> {
    let schema = schema.unwrap_or(config.server.schema);
    let bind = bind.unwrap_or(config.server.bind);
    let debounce = Duration::from_millis(config.server.debounce_ms);

    let shutdown = super::shutdown_on_ctrlc()?;

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::serve::render_serve_header(
                &schema.display().to_string(),
                &bind,
                ui.color,
                ui.unicode
            )
        );
    }

    super::runtime()?.block_on(serve(schema, &bind, debounce, shutdown, ui))
}

async fn serve(
    schema: PathBuf,
    bind: &str,
    debounce: Duration,
    shutdown: CancellationToken,
    ui: &UiContext,
) -> Result<()> {
    let mut channel = SyncChannel::bind(bind, &shutdown).await?;
    let changes = SchemaChanges::watch(&schema, debounce)?;
    let use_case = ServeUseCase::new(FileSchemaSource::new(schema));

    use_case
        .run(&mut channel, changes, shutdown, |event| {
            emit_server_event(ui, &event)
        })
        .await;

    Ok(())
}

fn emit_server_event(ui: &UiContext, event: &ServerEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let rendered = crate::ui::views::serve::render_server_event(
        &crate::ui::clock(),
        event,
        ui.color,
        ui.unicode,
    );
    match event {
        ServerEvent::Error { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
}
