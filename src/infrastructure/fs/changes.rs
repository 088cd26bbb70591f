//! Filesystem change subscription for the schema file
//!
//! Wraps a `notify` watcher in a cancellable, non-restartable sequence of
//! debounced change notices. The parent directory is watched and events are
//! filtered by file name, so editors that save via rename are still seen.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{SchemaSyncError, SchemaSyncResult};

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// One coalesced change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaChange {
    /// Number of raw filesystem events folded into this notice
    pub events: usize,
}

/// Manual trigger for a [`SchemaChanges`] built with [`SchemaChanges::manual`]
#[derive(Debug, Clone)]
pub struct ChangeTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl ChangeTrigger {
    /// Signal a change. Returns `false` once the subscription is closed.
    pub fn notify(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Debounced stream of schema file changes
pub struct SchemaChanges {
    rx: mpsc::UnboundedReceiver<()>,
    debounce: Duration,
    pending: usize,
    watcher: Option<RecommendedWatcher>,
}

impl SchemaChanges {
    /// Start watching `path` for modifications
    pub fn watch(path: &Path, debounce: Duration) -> SchemaSyncResult<Self> {
        let dir = watch_dir(path);
        let file_name: Option<OsString> = path.file_name().map(|n| n.to_os_string());
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if is_relevant(&event, file_name.as_deref()) {
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::warn!(error = %e, "filesystem watch error"),
            },
            Config::default(),
        )
        .map_err(|source| SchemaSyncError::Watch {
            path: path.to_path_buf(),
            source,
        })?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| SchemaSyncError::Watch {
                path: dir.clone(),
                source,
            })?;

        tracing::debug!(dir = %dir.display(), "watching schema directory");

        Ok(Self {
            rx,
            debounce,
            pending: 0,
            watcher: Some(watcher),
        })
    }

    /// Subscription fed by hand instead of the filesystem
    pub fn manual(debounce: Duration) -> (ChangeTrigger, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let changes = Self {
            rx,
            debounce,
            pending: 0,
            watcher: None,
        };
        (ChangeTrigger { tx }, changes)
    }

    /// Wait for the next change, coalescing events that arrive within the
    /// debounce window. Returns `None` once the subscription has ended.
    ///
    /// Cancel safe: events received before a cancellation are kept and
    /// reported by the next call.
    pub async fn next(&mut self) -> Option<SchemaChange> {
        loop {
            if self.pending == 0 {
                self.rx.recv().await?;
                self.pending = 1;
            }

            match tokio::time::timeout(self.debounce, self.rx.recv()).await {
                Ok(Some(())) => self.pending += 1,
                Ok(None) | Err(_) => {
                    let events = std::mem::take(&mut self.pending);
                    return Some(SchemaChange { events });
                }
            }
        }
    }

    /// Stop watching. Already received events are still delivered, after
    /// which [`next`](Self::next) returns `None` for good.
    pub fn close(&mut self) {
        self.watcher = None;
        self.rx.close();
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_relevant(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    match file_name {
        Some(name) => event.paths.iter().any(|p| p.file_name() == Some(name)),
        None => true,
    }
}
