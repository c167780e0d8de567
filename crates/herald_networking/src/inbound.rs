//! # Inbound Queue
//!
//! Bounded hand-off from transport callbacks to the tick loop.
//!
//! ```text
//! ┌─────────────┐   decode   ┌─────────────┐   drain    ┌─────────────┐
//! │  Transport  │──────────>│   Inbound   │──────────>│    Tick     │
//! │  handlers   │           │   channel   │           │   (apply)   │
//! └─────────────┘           └─────────────┘           └─────────────┘
//! ```
//!
//! Handlers never touch the store or mirror. A full channel drops the
//! message; the next resync restores consistency.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

use crate::protocol::Message;
use crate::transport::PeerId;

/// A decoded message together with the peer that sent it.
#[derive(Clone, Debug, PartialEq)]
pub struct Inbound {
    /// Sender reported by the transport.
    pub from: PeerId,
    /// The message.
    pub message: Message,
}

/// Bounded queue of decoded messages.
pub struct InboundQueue {
    sender: Sender<Inbound>,
    receiver: Receiver<Inbound>,
}

impl InboundQueue {
    /// Creates a queue holding at most `capacity` messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a producer handle for a transport callback.
    #[must_use]
    pub fn sender(&self) -> InboundSender {
        InboundSender { sender: self.sender.clone() }
    }

    /// Takes every pending message, oldest first (non-blocking).
    #[must_use]
    pub fn drain(&self) -> Vec<Inbound> {
        self.receiver.try_iter().collect()
    }

    /// Number of messages waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Producer handle held by transport callbacks.
#[derive(Clone)]
pub struct InboundSender {
    sender: Sender<Inbound>,
}

impl InboundSender {
    /// Enqueues without blocking.
    ///
    /// Returns `false` if the queue is full and the message was dropped.
    pub fn push(&self, inbound: Inbound) -> bool {
        match self.sender.try_send(inbound) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                warn!(from = %dropped.from, kind = ?dropped.message.kind(), "inbound queue full, message dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}
