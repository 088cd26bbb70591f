use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use schema_sync::application::agent::{follow, Backoff, FollowOptions};
use schema_sync::Config;

use crate::ui::context::UiContext;

pub fn cmd_follow(
    config: Config,
    url: Option<String>,
    output: Option<PathBuf>,
    ui: &UiContext,
) -> Result<()> {
    let url = url.unwrap_or_else(|| config.client.url.clone());
    let backoff = Backoff::new(
        Duration::from_millis(config.client.reconnect_initial_ms),
        Duration::from_millis(config.client.reconnect_max_ms),
    );
    let agent = super::build_agent(&config, output, ui);

    let shutdown = super::shutdown_on_ctrlc()?;

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::follow::render_follow_header(
                &url,
                &agent.options().output_dir.display().to_string(),
                &format!("{} ({})", agent.generator().program(), config.generator.kind),
                ui.color,
                ui.unicode
            )
        );
    }

    super::runtime()?.block_on(follow(
        &agent,
        FollowOptions { url, backoff },
        shutdown,
        |event| super::emit_agent_event(ui, &event),
    ));

    Ok(())
}
