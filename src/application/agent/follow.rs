//! Client loop: connect, hand payloads to the agent, reconnect on drop

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::ports::{CheckpointStore, GenerationInvoker};
use crate::infrastructure::channel::SyncClient;

use super::event::AgentEvent;
use super::use_case::SyncAgent;

/// Initial reconnect delay
pub const RECONNECT_INITIAL_MS: u64 = 1_000;
/// Max reconnect delay
pub const RECONNECT_MAX_MS: u64 = 30_000;

/// Exponential reconnect backoff
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait now; doubles the next one up to the maximum.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(RECONNECT_INITIAL_MS),
            Duration::from_millis(RECONNECT_MAX_MS),
        )
    }
}

#[derive(Debug, Clone)]
pub struct FollowOptions {
    pub url: String,
    pub backoff: Backoff,
}

/// Follow the server at `options.url` until `shutdown` is cancelled.
///
/// Payloads are handled strictly one at a time in receive order; messages
/// that arrive during a generator run wait in the socket.
///
/// Shutdown is observed between payloads only. A generator run that is in
/// progress when `shutdown` fires runs to completion and its checkpoint is
/// written before the loop exits.
pub async fn follow<C, G, F>(
    agent: &SyncAgent<C, G>,
    options: FollowOptions,
    shutdown: CancellationToken,
    on_event: F,
) where
    C: CheckpointStore,
    G: GenerationInvoker,
    F: Fn(AgentEvent),
{
    let FollowOptions { url, mut backoff } = options;

    on_event(AgentEvent::AgentStarted {
        url: url.clone(),
        output_dir: agent.options().output_dir.display().to_string(),
    });

    'outer: loop {
        let connected = tokio::select! {
            _ = shutdown.cancelled() => break,
            connected = SyncClient::connect(&url) => connected,
        };

        let delay = match connected {
            Ok(mut client) => {
                backoff.reset();
                on_event(AgentEvent::Connected { url: url.clone() });

                loop {
                    let received = tokio::select! {
                        _ = shutdown.cancelled() => {
                            client.close().await;
                            break 'outer;
                        }
                        received = client.next_payload() => received,
                    };

                    match received {
                        Ok(Some(payload)) => {
                            if let Err(e) = agent.handle_payload(&payload, &on_event).await {
                                on_event(AgentEvent::Error {
                                    message: e.to_string(),
                                });
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            on_event(AgentEvent::Error {
                                message: e.to_string(),
                            });
                            break;
                        }
                    }
                }

                let delay = backoff.next_delay();
                on_event(AgentEvent::Disconnected {
                    url: url.clone(),
                    retry_in_ms: millis(delay),
                });
                delay
            }
            Err(e) => {
                let delay = backoff.next_delay();
                on_event(AgentEvent::ConnectFailed {
                    url: url.clone(),
                    message: e.to_string(),
                    retry_in_ms: millis(delay),
                });
                delay
            }
        };

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    on_event(AgentEvent::Shutdown);
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
