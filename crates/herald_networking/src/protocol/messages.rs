//! Message definitions for the replication exchange.

use herald_shared::{EntityId, Profile};

/// Wire tag, the first byte of every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MessageKind {
    /// Client → host: set or clear the sender's profile.
    UpdateRequest = 1,
    /// Host → everyone: authoritative assignment for one entity.
    UpdateBroadcast = 2,
    /// Client → host: ask for a full snapshot.
    SyncRequest = 3,
    /// Host → requester: every stored profile.
    SyncAll = 4,
}

impl MessageKind {
    /// Every kind, in tag order.
    pub const ALL: [Self; 4] =
        [Self::UpdateRequest, Self::UpdateBroadcast, Self::SyncRequest, Self::SyncAll];

    /// Converts from the wire tag.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::UpdateRequest),
            2 => Some(Self::UpdateBroadcast),
            3 => Some(Self::SyncRequest),
            4 => Some(Self::SyncAll),
            _ => None,
        }
    }
}

/// A decoded replication message.
///
/// `None` profiles mean "clear".
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Set (or clear) the sender's own profile. The target entity is the
    /// sender the transport reports, never a field of the message.
    UpdateRequest(Option<Profile>),
    /// Authoritative assignment.
    UpdateBroadcast {
        /// Entity whose profile changed.
        entity: EntityId,
        /// New profile, `None` to clear.
        profile: Option<Profile>,
    },
    /// Late-join catch-up request.
    SyncRequest,
    /// Full snapshot of every non-blank stored profile.
    SyncAll(Vec<(EntityId, Profile)>),
}

impl Message {
    /// Returns this message's wire tag.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::UpdateRequest(_) => MessageKind::UpdateRequest,
            Self::UpdateBroadcast { .. } => MessageKind::UpdateBroadcast,
            Self::SyncRequest => MessageKind::SyncRequest,
            Self::SyncAll(_) => MessageKind::SyncAll,
        }
    }
}
