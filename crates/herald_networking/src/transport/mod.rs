//! # Transport Layer
//!
//! The byte-moving seam between the replication logic and whatever session
//! library carries it.
//!
//! ## Design
//!
//! - Fire-and-forget sends; no retries, no acknowledgements
//! - Handlers registered per message kind, dispatched on the tag byte
//! - Handlers run on the transport's thread and must only enqueue
//!
//! [`LoopbackHub`] is an in-memory implementation: every connected peer
//! gets an inbox, and [`LoopbackHub::pump`] delivers whatever is queued.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use herald_shared::EntityId;
use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::protocol::MessageKind;

/// Session-level identity of a peer. Each peer owns the entity with the
/// same id.
pub type PeerId = EntityId;

/// Callback invoked with the sender and the full message bytes.
pub type Handler = Box<dyn Fn(PeerId, &[u8]) + Send + Sync>;

/// Where a message goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// The session's host.
    Host,
    /// Every connected peer, the sender included.
    Everyone,
    /// One specific peer.
    Peer(PeerId),
}

/// A send/receive channel with registerable message handlers.
pub trait Transport: Send + Sync {
    /// This peer's id.
    fn local_peer(&self) -> PeerId;

    /// The peer the session layer designated as host, if resolved.
    fn host(&self) -> Option<PeerId>;

    /// Queues `bytes` for `recipient`. Undeliverable messages are dropped.
    fn send(&self, recipient: Recipient, bytes: &[u8]);

    /// Routes incoming messages whose tag is `kind` to `handler`, replacing
    /// any earlier handler for that kind.
    fn register_handler(&self, kind: MessageKind, handler: Handler);
}

/// Transport statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Messages queued, counted once per recipient.
    pub messages_sent: u64,
    /// Messages handed to a handler.
    pub messages_delivered: u64,
    /// Bytes queued.
    pub bytes_sent: u64,
    /// Messages with no route or no handler.
    pub messages_dropped: u64,
}

struct Envelope {
    from: PeerId,
    bytes: Vec<u8>,
}

struct PeerSlot {
    inbox_tx: Sender<Envelope>,
    inbox_rx: Receiver<Envelope>,
    handlers: RwLock<HashMap<MessageKind, Handler>>,
}

impl PeerSlot {
    fn new() -> Self {
        let (inbox_tx, inbox_rx) = unbounded();
        Self { inbox_tx, inbox_rx, handlers: RwLock::new(HashMap::new()) }
    }
}

#[derive(Default)]
struct HubInner {
    peers: RwLock<BTreeMap<PeerId, Arc<PeerSlot>>>,
    host: RwLock<Option<PeerId>>,
    stats: Mutex<TransportStats>,
}

/// In-memory session connecting any number of [`LoopbackTransport`]s.
#[derive(Clone, Default)]
pub struct LoopbackHub {
    inner: Arc<HubInner>,
}

impl LoopbackHub {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `peer`, returning its transport endpoint.
    #[must_use]
    pub fn connect(&self, peer: PeerId) -> LoopbackTransport {
        self.inner.peers.write().insert(peer, Arc::new(PeerSlot::new()));
        trace!(%peer, "loopback peer connected");
        LoopbackTransport { peer, hub: self.clone() }
    }

    /// Disconnects `peer`, discarding its inbox.
    pub fn disconnect(&self, peer: PeerId) {
        self.inner.peers.write().remove(&peer);
        let mut host = self.inner.host.write();
        if *host == Some(peer) {
            *host = None;
        }
        trace!(%peer, "loopback peer disconnected");
    }

    /// Designates the session host.
    pub fn set_host(&self, peer: PeerId) {
        *self.inner.host.write() = Some(peer);
    }

    /// The session host, if any.
    #[must_use]
    pub fn host(&self) -> Option<PeerId> {
        *self.inner.host.read()
    }

    /// Connected peers in id order.
    #[must_use]
    pub fn peers(&self) -> Vec<PeerId> {
        self.inner.peers.read().keys().copied().collect()
    }

    /// Returns a copy of the statistics.
    #[must_use]
    pub fn stats(&self) -> TransportStats {
        *self.inner.stats.lock()
    }

    /// Delivers every queued message to its handler.
    ///
    /// Returns the number of messages handed to handlers.
    pub fn pump(&self) -> usize {
        let slots: Vec<Arc<PeerSlot>> = self.inner.peers.read().values().cloned().collect();
        let mut delivered = 0;

        for slot in slots {
            while let Ok(envelope) = slot.inbox_rx.try_recv() {
                let kind = envelope.bytes.first().copied().and_then(MessageKind::from_u8);
                let handlers = slot.handlers.read();
                match kind.and_then(|k| handlers.get(&k)) {
                    Some(handler) => {
                        handler(envelope.from, &envelope.bytes);
                        delivered += 1;
                    }
                    None => {
                        trace!(from = %envelope.from, "no handler for message, dropped");
                        self.inner.stats.lock().messages_dropped += 1;
                    }
                }
            }
        }

        self.inner.stats.lock().messages_delivered += delivered as u64;
        delivered
    }

    fn route(&self, from: PeerId, recipient: Recipient, bytes: &[u8]) {
        let peers = self.inner.peers.read();
        let targets: Vec<&Arc<PeerSlot>> = match recipient {
            Recipient::Everyone => peers.values().collect(),
            Recipient::Host => self.host().and_then(|host| peers.get(&host)).into_iter().collect(),
            Recipient::Peer(peer) => peers.get(&peer).into_iter().collect(),
        };

        let mut stats = self.inner.stats.lock();
        if targets.is_empty() {
            trace!(%from, ?recipient, "no route, dropped");
            stats.messages_dropped += 1;
            return;
        }
        for slot in targets {
            // Both ends live in the slot, so the inbox cannot be disconnected.
            let envelope = Envelope { from, bytes: bytes.to_vec() };
            if slot.inbox_tx.send(envelope).is_ok() {
                stats.messages_sent += 1;
                stats.bytes_sent += bytes.len() as u64;
            }
        }
    }
}

/// One peer's endpoint on a [`LoopbackHub`].
#[derive(Clone)]
pub struct LoopbackTransport {
    peer: PeerId,
    hub: LoopbackHub,
}

impl Transport for LoopbackTransport {
    fn local_peer(&self) -> PeerId {
        self.peer
    }

    fn host(&self) -> Option<PeerId> {
        self.hub.host()
    }

    fn send(&self, recipient: Recipient, bytes: &[u8]) {
        self.hub.route(self.peer, recipient, bytes);
    }

    fn register_handler(&self, kind: MessageKind, handler: Handler) {
        let slot = self.hub.inner.peers.read().get(&self.peer).cloned();
        match slot {
            Some(slot) => {
                slot.handlers.write().insert(kind, handler);
            }
            None => trace!(peer = %self.peer, ?kind, "handler for disconnected peer ignored"),
        }
    }
}
