//! WebSocket side of the sync channel (server)
//!
//! An acceptor task performs the WebSocket handshake for each incoming TCP
//! connection and hands the hub a [`Subscriber`]. Connection tasks only talk
//! to the hub through [`ChannelEvent`]s, so the hub loop owns all mutable
//! state without locks.

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::error::{SchemaSyncError, SchemaSyncResult};

use super::subscribers::{Payload, Subscriber, SubscriberId};

/// WebSocket keepalive ping interval
pub const PING_INTERVAL_SECS: u64 = 30;

/// How long shutdown waits for connection tasks to send their close frames
const DRAIN_TIMEOUT_MS: u64 = 2_000;

/// Connection lifecycle notifications delivered to the hub
#[derive(Debug)]
pub enum ChannelEvent {
    Connected(Subscriber),
    Disconnected { id: SubscriberId, peer: String },
}

/// Listening WebSocket endpoint
pub struct SyncChannel {
    local_addr: SocketAddr,
    events: mpsc::UnboundedReceiver<ChannelEvent>,
    tracker: TaskTracker,
    stop: CancellationToken,
}

impl SyncChannel {
    /// Bind `addr` and start accepting. Accepting stops when `shutdown` is
    /// cancelled or [`drain`](Self::drain) is called.
    pub async fn bind(addr: &str, shutdown: &CancellationToken) -> SchemaSyncResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| SchemaSyncError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        let (events_tx, events) = mpsc::unbounded_channel();
        let tracker = TaskTracker::new();
        let stop = shutdown.child_token();

        tracker.spawn(accept_loop(
            listener,
            events_tx,
            tracker.clone(),
            stop.clone(),
        ));

        tracing::info!(%local_addr, "sync channel listening");

        Ok(Self {
            local_addr,
            events,
            tracker,
            stop,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Next connection event. Cancel safe.
    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        self.events.recv().await
    }

    /// Stop accepting and wait (bounded) for open connections to finish
    /// closing. Subscribers must already have been dropped by the hub.
    pub async fn drain(&mut self) {
        self.stop.cancel();
        self.tracker.close();
        self.events.close();
        // Connections the hub never saw still hold a sender; drop them.
        while self.events.try_recv().is_ok() {}

        let wait = self.tracker.wait();
        if tokio::time::timeout(Duration::from_millis(DRAIN_TIMEOUT_MS), wait)
            .await
            .is_err()
        {
            tracing::warn!("timed out waiting for connections to close");
        }
    }
}

async fn accept_loop(
    listener: TcpListener,
    events: mpsc::UnboundedSender<ChannelEvent>,
    tracker: TaskTracker,
    stop: CancellationToken,
) {
    let mut next_id: SubscriberId = 0;

    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    next_id += 1;
                    tracker.spawn(serve_connection(stream, peer, next_id, events.clone()));
                }
                Err(e) => tracing::warn!(error = %e, "failed to accept connection"),
            },
        }
    }

    tracing::debug!("acceptor stopped");
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    id: SubscriberId,
    events: mpsc::UnboundedSender<ChannelEvent>,
) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::debug!(%peer, error = %e, "websocket handshake failed");
            return;
        }
    };
    let (mut sink, mut incoming) = ws.split();

    let peer = peer.to_string();
    let (subscriber, mut outbound) = Subscriber::channel(id, peer.clone());
    if events.send(ChannelEvent::Connected(subscriber)).is_err() {
        let _ = sink.send(Message::Close(None)).await;
        return;
    }

    let mut ping = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));
    ping.tick().await;

    loop {
        tokio::select! {
            payload = outbound.recv() => match payload {
                Some(payload) => {
                    if send_payload(&mut sink, &payload).await.is_err() {
                        break;
                    }
                }
                None => {
                    // Hub dropped us: server is shutting down.
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            _ = ping.tick() => {
                if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
            msg = incoming.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::debug!(%peer, error = %e, "websocket read error");
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    // Mark closed before telling the hub, so a broadcast racing with this
    // disconnect skips the subscriber.
    outbound.close();
    let _ = events.send(ChannelEvent::Disconnected { id, peer });
}

async fn send_payload<S>(sink: &mut S, payload: &Payload) -> Result<(), S::Error>
where
    S: futures::Sink<Message> + Unpin,
{
    sink.send(Message::binary(payload.to_vec())).await
}
