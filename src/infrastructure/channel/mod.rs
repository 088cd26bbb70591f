//! Sync Channel
//!
//! Persistent, message-oriented WebSocket connection between one server and
//! many clients. One binary message per schema snapshot; fire-and-forget,
//! no buffering for disconnected clients.

mod client;
mod server;
mod subscribers;

pub use client::{ClientStream, SyncClient};
pub use server::{ChannelEvent, SyncChannel, PING_INTERVAL_SECS};
pub use subscribers::{BroadcastReport, Payload, Subscriber, SubscriberId, SubscriberSet};
