//! # Sync Protocol
//!
//! Sends and receives the four replication messages on top of a
//! [`Transport`]. Incoming messages are decoded on the transport's thread
//! and queued; the caller drains them once per tick and decides what to
//! apply based on its [`Role`].
//!
//! Without a transport or a resolved role every send is a silent no-op.

use std::sync::Arc;

use herald_shared::{EntityId, Profile};
use tracing::{debug, info, trace, warn};

use crate::inbound::{Inbound, InboundQueue, InboundSender};
use crate::protocol::{decode, Message, MessageKind, MessageSerializer};
use crate::transport::{Handler, PeerId, Recipient, Transport};

/// This peer's authority in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Holds the authoritative store.
    Host,
    /// Mirrors the host.
    Client,
}

/// The replication exchange for one peer.
pub struct SyncProtocol {
    transport: Option<Arc<dyn Transport>>,
    role: Option<Role>,
    inbound: InboundQueue,
}

impl SyncProtocol {
    /// Creates a detached protocol with an inbound queue of `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { transport: None, role: None, inbound: InboundQueue::new(capacity) }
    }

    /// Connects to `transport` and registers a handler for every message
    /// kind.
    pub fn attach(&mut self, transport: Arc<dyn Transport>, role: Option<Role>) {
        for kind in MessageKind::ALL {
            transport.register_handler(kind, decoding_handler(kind, self.inbound.sender()));
        }
        debug!(peer = %transport.local_peer(), ?role, "sync protocol attached");
        self.transport = Some(transport);
        self.role = role;
    }

    /// Drops the transport; later sends are no-ops.
    pub fn detach(&mut self) {
        self.transport = None;
    }

    /// Updates the role once the session layer has resolved it.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    /// Current role, `None` while unresolved.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns true if this peer is the host.
    #[must_use]
    pub fn is_host(&self) -> bool {
        self.role == Some(Role::Host)
    }

    /// Returns true if sends can go anywhere.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_some() && self.role.is_some()
    }

    /// This peer's id, if attached.
    #[must_use]
    pub fn local_peer(&self) -> Option<PeerId> {
        self.transport.as_ref().map(|t| t.local_peer())
    }

    /// The session host as reported by the transport.
    #[must_use]
    pub fn session_host(&self) -> Option<PeerId> {
        self.transport.as_ref().and_then(|t| t.host())
    }

    /// Returns true if `from` may assign authoritative state here.
    ///
    /// A host only trusts its own broadcasts; a client only trusts the
    /// session host.
    #[must_use]
    pub fn accepts_authority_from(&self, from: PeerId) -> bool {
        match (&self.transport, self.role) {
            (Some(transport), Some(Role::Host)) => from == transport.local_peer(),
            (Some(transport), Some(Role::Client)) => transport.host() == Some(from),
            _ => false,
        }
    }

    /// Client → host: set or clear this peer's own profile.
    pub fn request_update(&self, profile: Option<&Profile>) {
        self.send(Recipient::Host, &Message::UpdateRequest(profile.cloned()));
    }

    /// Client → host: ask for a full snapshot.
    pub fn request_sync(&self) {
        self.send(Recipient::Host, &Message::SyncRequest);
    }

    /// Host → everyone: authoritative assignment for `entity`.
    pub fn broadcast(&self, entity: EntityId, profile: Option<&Profile>) {
        if !self.is_host() {
            trace!(%entity, "broadcast from non-host ignored");
            return;
        }
        debug!(%entity, cleared = profile.is_none(), "host rebroadcast");
        let message = Message::UpdateBroadcast { entity, profile: profile.cloned() };
        self.send(Recipient::Everyone, &message);
    }

    /// Host → `peer`: every stored profile.
    pub fn send_snapshot(&self, peer: PeerId, entries: Vec<(EntityId, Profile)>) {
        if !self.is_host() {
            trace!(%peer, "snapshot from non-host ignored");
            return;
        }
        info!(%peer, entries = entries.len(), "full sync sent");
        self.send(Recipient::Peer(peer), &Message::SyncAll(entries));
    }

    /// Takes every message received since the last call.
    #[must_use]
    pub fn drain(&self) -> Vec<Inbound> {
        self.inbound.drain()
    }

    fn send(&self, recipient: Recipient, message: &Message) {
        let (Some(transport), Some(_)) = (&self.transport, self.role) else {
            trace!(kind = ?message.kind(), "no transport or role, send skipped");
            return;
        };

        let mut serializer = MessageSerializer::new();
        match serializer.serialize(message) {
            Ok(bytes) => transport.send(recipient, bytes),
            Err(error) => warn!(kind = ?message.kind(), %error, "message not encodable, dropped"),
        }
    }
}

fn decoding_handler(kind: MessageKind, sink: InboundSender) -> Handler {
    Box::new(move |from, bytes| match decode(bytes) {
        Ok(message) if message.kind() == kind => {
            sink.push(Inbound { from, message });
        }
        Ok(message) => {
            warn!(%from, expected = ?kind, got = ?message.kind(), "message routed to wrong handler");
        }
        Err(error) => warn!(%from, ?kind, %error, "malformed message rejected"),
    })
}
