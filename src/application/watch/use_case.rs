//! Watch-and-broadcast use case

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::ports::SchemaSource;
use crate::infrastructure::channel::{
    BroadcastReport, ChannelEvent, Subscriber, SubscriberId, SubscriberSet, SyncChannel,
};
use crate::infrastructure::fs::SchemaChanges;

use super::cache::SchemaWatcher;
use super::event::ServerEvent;

/// Schema server
///
/// Owns the snapshot cache and the subscriber set. All handlers run on the
/// hub loop one at a time, so neither needs a lock.
pub struct ServeUseCase<S> {
    watcher: SchemaWatcher<S>,
    subscribers: SubscriberSet,
}

impl<S: SchemaSource> ServeUseCase<S> {
    pub fn new(source: S) -> Self {
        Self {
            watcher: SchemaWatcher::new(source),
            subscribers: SubscriberSet::new(),
        }
    }

    pub fn watcher(&self) -> &SchemaWatcher<S> {
        &self.watcher
    }

    pub fn subscribers(&self) -> &SubscriberSet {
        &self.subscribers
    }

    /// Register a new subscriber and send it the current snapshot only.
    pub async fn on_connect<F>(&mut self, subscriber: Subscriber, on_event: &F)
    where
        F: Fn(ServerEvent),
    {
        let id = subscriber.id();
        on_event(ServerEvent::ClientConnected {
            id,
            peer: subscriber.peer().to_string(),
            clients: self.subscribers.len() + 1,
        });
        self.subscribers.insert(subscriber);

        match self.watcher.get_schema(false).await {
            Ok(snapshot) => {
                if self.subscribers.send_to(id, Arc::clone(snapshot.bytes())) {
                    on_event(ServerEvent::SnapshotSent {
                        id,
                        fingerprint: snapshot.fingerprint().to_string(),
                        bytes: snapshot.len(),
                    });
                }
            }
            Err(e) => on_event(ServerEvent::Error {
                message: e.to_string(),
            }),
        }
    }

    pub fn on_disconnect<F>(&mut self, id: SubscriberId, peer: &str, on_event: &F)
    where
        F: Fn(ServerEvent),
    {
        self.subscribers.remove(id);
        on_event(ServerEvent::ClientDisconnected {
            id,
            peer: peer.to_string(),
            clients: self.subscribers.len(),
        });
    }

    /// Reload after a file-change notification and broadcast if the content
    /// is new. Returns the broadcast report when a broadcast happened.
    pub async fn on_change<F>(&mut self, on_event: &F) -> Option<BroadcastReport>
    where
        F: Fn(ServerEvent),
    {
        let snapshot = match self.watcher.get_schema(true).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                on_event(ServerEvent::Error {
                    message: e.to_string(),
                });
                return None;
            }
        };

        if !snapshot.has_changed() {
            on_event(ServerEvent::NoChange {
                fingerprint: snapshot.fingerprint().to_string(),
            });
            return None;
        }

        let report = self.subscribers.broadcast(snapshot.bytes());
        on_event(ServerEvent::SchemaChanged {
            fingerprint: snapshot.fingerprint().to_string(),
            bytes: snapshot.len(),
            delivered: report.delivered,
            pruned: report.pruned.len(),
        });
        Some(report)
    }

    /// Drop every subscriber; their connections close.
    pub fn close_all<F>(&mut self, on_event: &F)
    where
        F: Fn(ServerEvent),
    {
        let closed = self.subscribers.close_all();
        on_event(ServerEvent::Shutdown { closed });
    }

    /// Run the hub loop until `shutdown` is cancelled or the change
    /// subscription ends, then stop watching and close every subscriber.
    pub async fn run<F>(
        mut self,
        channel: &mut SyncChannel,
        mut changes: SchemaChanges,
        shutdown: CancellationToken,
        on_event: F,
    ) where
        F: Fn(ServerEvent),
    {
        on_event(ServerEvent::ServerStarted {
            schema: self.watcher.source().describe(),
            address: channel.local_addr().to_string(),
        });

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = channel.next_event() => match event {
                    Some(ChannelEvent::Connected(subscriber)) => {
                        self.on_connect(subscriber, &on_event).await;
                    }
                    Some(ChannelEvent::Disconnected { id, peer }) => {
                        self.on_disconnect(id, &peer, &on_event);
                    }
                    None => break,
                },
                change = changes.next() => match change {
                    Some(change) => {
                        tracing::debug!(events = change.events, "schema change notification");
                        self.on_change(&on_event).await;
                    }
                    None => break,
                },
            }
        }

        changes.close();
        self.close_all(&on_event);
        channel.drain().await;
    }
}
