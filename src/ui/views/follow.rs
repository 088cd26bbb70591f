use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::serve::short;
use schema_sync::application::agent::AgentEvent;

pub fn render_follow_header(
    url: &str,
    output_dir: &str,
    generator: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Remote, "schema-sync follow");
    header.add("Server", url);
    header.add("Output", output_dir);
    header.add("Generator", generator);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_agent_event(
    timestamp: &str,
    event: &AgentEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        AgentEvent::AgentStarted { url, output_dir } => format!(
            "{} {} Following {} into {}\n",
            prefix,
            icon(Icon::Remote),
            url,
            output_dir
        ),
        AgentEvent::Connected { url } => {
            format!("{} {} Connected to {}\n", prefix, icon(Icon::Link), url)
        }
        AgentEvent::Disconnected { url, retry_in_ms } => format!(
            "{} {} Disconnected from {}, retrying in {}\n",
            prefix,
            icon(Icon::Warning),
            url,
            seconds(*retry_in_ms)
        ),
        AgentEvent::ConnectFailed {
            url,
            message,
            retry_in_ms,
        } => format!(
            "{} {} Cannot reach {} ({}), retrying in {}\n",
            prefix,
            icon(Icon::Warning),
            url,
            message,
            seconds(*retry_in_ms)
        ),
        AgentEvent::NoChange { fingerprint } => format!(
            "{} {} Schema unchanged ({})\n",
            prefix,
            icon(Icon::Skip),
            short(fingerprint)
        ),
        AgentEvent::ChangeDetected {
            fingerprint,
            previous,
        } => match previous {
            Some(previous) => format!(
                "{} {} Schema changed: {} -> {}, generating...\n",
                prefix,
                icon(Icon::Progress),
                short(previous),
                short(fingerprint)
            ),
            None => format!(
                "{} {} New schema {}, generating...\n",
                prefix,
                icon(Icon::Progress),
                short(fingerprint)
            ),
        },
        AgentEvent::GenerationComplete {
            code,
            success,
            elapsed_ms,
            ..
        } => {
            let status = match code {
                Some(code) => format!("exited with code {}", code),
                None => "was terminated by a signal".to_string(),
            };
            let icon = if *success {
                icon(Icon::Success)
            } else {
                icon(Icon::Error)
            };
            format!(
                "{} {} Generator {} after {}\n",
                prefix,
                icon,
                status,
                seconds(*elapsed_ms)
            )
        }
        AgentEvent::CheckpointUnreadable { message } => format!(
            "{} {} Ignoring checkpoint: {}\n",
            prefix,
            icon(Icon::Warning),
            message
        ),
        AgentEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        AgentEvent::Shutdown => format!(
            "\n{} {} Stopped following.\n",
            prefix,
            icon(Icon::Remote)
        ),
    }
}

fn seconds(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}
