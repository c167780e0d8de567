//! # HERALD Networking
//!
//! Host-authoritative replication of title profiles.
//!
//! ## Architecture
//!
//! - **Protocol**: four messages, strict little-endian codec
//! - **Transport**: abstract send/receive with per-kind handlers
//! - **Inbound**: bounded queue between transport callbacks and the tick
//! - **Host**: the authoritative store, the only writer
//! - **Client**: the broadcast-fed mirror every peer renders from
//!
//! ## Authority Model
//!
//! ```text
//! CLIENT                           HOST
//!   |                                 |
//!   |--- "my title is X" ------------>| <- store.apply, last write wins
//!   |<-- "entity 7's title is X" -----| -> everyone, host included
//!   |                                 |
//! ```
//!
//! A connected client never writes its own mirror. It waits for the host.
//!
//! ## Consistency
//!
//! Eventually consistent: no retries, no persistence. A late joiner or a
//! peer that dropped messages catches up with a full sync.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod host;
pub mod inbound;
pub mod protocol;
pub mod sync;
pub mod transport;

pub use client::{MirrorChange, ProfileMirror};
pub use error::{ProtocolError, ProtocolResult};
pub use host::{ReplicationStore, StoreChange};
pub use inbound::{Inbound, InboundQueue, InboundSender};
pub use protocol::{decode, encode, Message, MessageKind};
pub use sync::{Role, SyncProtocol};
pub use transport::{
    Handler, LoopbackHub, LoopbackTransport, PeerId, Recipient, Transport, TransportStats,
};
