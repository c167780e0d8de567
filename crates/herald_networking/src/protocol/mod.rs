//! # Replication Protocol
//!
//! Four messages carry every profile change between peers.
//!
//! ## Exchange
//!
//! ```text
//! CLIENT                              HOST
//!   |--- UpdateRequest(profile?) ------>|  store.apply
//!   |<-- UpdateBroadcast(id, profile?) -|  (to everyone, host included)
//!   |                                   |
//!   |--- SyncRequest ------------------>|  on join
//!   |<-- SyncAll([(id, profile)]) ------|  (to the requester only)
//! ```
//!
//! The host is the only writer. Everyone else renders what it broadcasts.

mod messages;
mod serialization;

pub use messages::{Message, MessageKind};
pub use serialization::{decode, encode, MessageDeserializer, MessageSerializer};
