//! Subscriber set for the sync channel
//!
//! Each connected client is represented by a `Subscriber` holding the sending
//! half of its outbound queue. The connection task owns the receiving half and
//! closes it when the socket goes away, which is how the set learns a
//! subscriber is no longer open.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc;

/// Connection identifier, assigned in accept order
pub type SubscriberId = u64;

/// One whole-schema message
pub type Payload = Arc<[u8]>;

#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    peer: String,
    tx: mpsc::UnboundedSender<Payload>,
}

impl Subscriber {
    /// Create a subscriber and the receiver its connection task drains
    pub fn channel(
        id: SubscriberId,
        peer: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<Payload>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber = Self {
            id,
            peer: peer.into(),
            tx,
        };
        (subscriber, rx)
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Whether the connection is still open/ready to receive
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Queue a payload. Fire-and-forget: returns `false` if the connection
    /// has already gone.
    pub fn send(&self, payload: Payload) -> bool {
        self.tx.send(payload).is_ok()
    }
}

/// Outcome of a broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers the payload was queued for
    pub delivered: usize,
    /// Subscribers found closed and removed from the set
    pub pruned: Vec<SubscriberId>,
}

/// Currently connected subscribers, iterated in connection order
#[derive(Debug, Default)]
pub struct SubscriberSet {
    subscribers: BTreeMap<SubscriberId, Subscriber>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn insert(&mut self, subscriber: Subscriber) {
        self.subscribers.insert(subscriber.id, subscriber);
    }

    pub fn remove(&mut self, id: SubscriberId) -> Option<Subscriber> {
        self.subscribers.remove(&id)
    }

    /// Send to one subscriber only
    pub fn send_to(&self, id: SubscriberId, payload: Payload) -> bool {
        self.subscribers
            .get(&id)
            .is_some_and(|s| s.is_open() && s.send(payload))
    }

    /// Send to every open subscriber; closed ones are pruned.
    pub fn broadcast(&mut self, payload: &Payload) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for subscriber in self.subscribers.values() {
            if subscriber.is_open() && subscriber.send(Arc::clone(payload)) {
                report.delivered += 1;
            } else {
                report.pruned.push(subscriber.id);
            }
        }

        for id in &report.pruned {
            self.subscribers.remove(id);
        }

        report
    }

    /// Drop every subscriber, which makes each connection task close its
    /// socket. Returns how many were connected.
    pub fn close_all(&mut self) -> usize {
        let count = self.subscribers.len();
        self.subscribers.clear();
        count
    }
}
