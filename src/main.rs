//! schema-sync CLI
//!
//! Usage: schema-sync <COMMAND>
//!
//! Commands:
//!   serve        Watch the schema file and broadcast it to clients
//!   follow       Follow a server and regenerate on change
//!   sync         Apply a local schema file once
//!   fingerprint  Print a file's fingerprint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use schema_sync::Config;
use ui::context::UiContext;

/// Diagnostics go to stderr so NDJSON on stdout stays clean.
///
/// - 0: WARN (or `RUST_LOG`)
/// - 1 (-v): INFO
/// - 2 (-vv): DEBUG
/// - 3+ (-vvv): TRACE
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,schema_sync=info".to_string(),
            2 => "info,schema_sync=debug".to_string(),
            _ => "debug,schema_sync=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, warnings) = Config::resolve(cli.config.as_deref())?;
    let ui = UiContext::new(cli.json, cli.color);
    if !ui.json {
        for warning in &warnings {
            eprint!("{}", ui::views::config::render_config_warning(warning, ui.color, ui.unicode));
        }
    }

    match cli.command {
        Commands::Serve { schema, bind } => commands::serve::cmd_serve(config, schema, bind, &ui),
        Commands::Follow { url, output } => commands::follow::cmd_follow(config, url, output, &ui),
        Commands::Sync { file, output } => commands::sync::cmd_sync(config, &file, output, &ui),
        Commands::Fingerprint { path } => commands::fingerprint::cmd_fingerprint(&path, &ui),
    }
}
