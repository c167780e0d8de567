//! # Profile Error Types
//!
//! Errors raised when a profile carries values the engine cannot animate.

use thiserror::Error;

/// Errors that can occur when validating a profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A text animation was configured with a non-positive or non-finite
    /// frame delay.
    #[error("frame speed must be a positive number of seconds, got {0}")]
    InvalidFrameSpeed(f32),

    /// A marquee window wider than [`crate::MAX_MARQUEE_WIDTH`].
    #[error("marquee width {0} exceeds the maximum of {}", crate::MAX_MARQUEE_WIDTH)]
    MarqueeTooWide(i32),

    /// A float parameter was NaN or infinite.
    #[error("parameter `{field}` must be finite")]
    NonFinite {
        /// Name of the offending parameter.
        field: &'static str,
    },
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
