use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use schema_sync::application::watch::ServerEvent;

pub fn render_serve_header(
    schema: &str,
    bind: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "schema-sync serve");
    header.add("Schema", schema);
    header.add("Listen", format!("ws://{}", bind));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_server_event(
    timestamp: &str,
    event: &ServerEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        ServerEvent::ServerStarted { schema, address } => format!(
            "{} {} Serving {} on ws://{}\n",
            prefix,
            icon(Icon::Watch),
            schema,
            address
        ),
        ServerEvent::ClientConnected { id, peer, clients } => format!(
            "{} {} Client #{} connected from {} ({} connected)\n",
            prefix,
            icon(Icon::Link),
            id,
            peer,
            clients
        ),
        ServerEvent::ClientDisconnected { id, peer, clients } => format!(
            "{} {} Client #{} ({}) disconnected ({} connected)\n",
            prefix,
            icon(Icon::Arrow),
            id,
            peer,
            clients
        ),
        ServerEvent::SnapshotSent {
            id,
            fingerprint,
            bytes,
        } => format!(
            "{} {} Sent {} ({} bytes) to client #{}\n",
            prefix,
            icon(Icon::Arrow),
            short(fingerprint),
            bytes,
            id
        ),
        ServerEvent::SchemaChanged {
            fingerprint,
            bytes,
            delivered,
            pruned,
        } => {
            let mut line = format!(
                "{} {} Schema changed: {} ({} bytes), sent to {} client(s)",
                prefix,
                icon(Icon::Progress),
                short(fingerprint),
                bytes,
                delivered
            );
            if *pruned > 0 {
                line.push_str(&format!(", {} closed", pruned));
            }
            line.push('\n');
            line
        }
        ServerEvent::NoChange { fingerprint } => format!(
            "{} {} No change ({})\n",
            prefix,
            icon(Icon::Skip),
            short(fingerprint)
        ),
        ServerEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        ServerEvent::Shutdown { closed } => format!(
            "\n{} {} Server stopped, closed {} connection(s).\n",
            prefix,
            icon(Icon::Watch),
            closed
        ),
    }
}

/// First 12 hex digits, enough to tell versions apart in a log.
pub(crate) fn short(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
