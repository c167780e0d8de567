//! # Protocol Error Types
//!
//! Everything that can make an incoming message unusable. A rejected
//! message is dropped whole; prior state is never partially updated.

use herald_shared::ProfileError;
use thiserror::Error;

/// Errors raised while encoding or decoding a message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// The buffer ended before the field did.
    #[error("truncated message: needed {needed} more bytes, {remaining} left")]
    Truncated {
        /// Bytes the field needed.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// The first byte is not a known message tag.
    #[error("unknown message tag: {0}")]
    UnknownTag(u8),

    /// An enum byte is out of range.
    #[error("invalid {field} discriminant: {value}")]
    InvalidEnum {
        /// Which enum.
        field: &'static str,
        /// The offending byte.
        value: u8,
    },

    /// A boolean byte other than 0 or 1.
    #[error("invalid bool byte: {0}")]
    InvalidBool(u8),

    /// A string field is not UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// A string is longer than a `u16` length prefix can express.
    #[error("string of {0} bytes exceeds the u16 length prefix")]
    StringTooLong(usize),

    /// A snapshot has more entries than a `u16` count can express.
    #[error("snapshot of {0} entries exceeds the u16 entry count")]
    TooManyEntries(usize),

    /// Bytes remain after a complete message.
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),

    /// The decoded profile fails validation.
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
