//! # Label Constants
//!
//! Defaults shared by hosts and clients. Timing values here are only
//! defaults; the engine configuration may override the typewriter and
//! cleanup timings.

// =============================================================================
// TICK CONFIGURATION
// =============================================================================

/// Tick rate (updates per second).
pub const TICK_RATE: u32 = 60;

/// Seconds between peer-liveness sweeps.
pub const CLEANUP_INTERVAL_SECONDS: f32 = 5.0;

// =============================================================================
// TEXT ANIMATION
// =============================================================================

/// Default delay between animation frames.
pub const DEFAULT_FRAME_SECONDS: f32 = 0.15;

/// Default visible window of a marquee, in characters.
pub const DEFAULT_MARQUEE_WIDTH: i32 = 16;

/// Widest marquee window a profile may ask for.
pub const MAX_MARQUEE_WIDTH: i32 = 128;

/// How long a fully typed typewriter frame is held before erasing.
pub const HOLD_DURATION_SECONDS: f32 = 5.0;

/// Cursor toggle interval while a typewriter frame is held.
pub const BLINK_INTERVAL_SECONDS: f32 = 0.5;

// =============================================================================
// COLORING
// =============================================================================

/// Default color phase advance per second (one full hue cycle every 5s).
pub const DEFAULT_COLOR_SPEED: f32 = 0.2;

/// Default number of characters per gradient/wave cycle.
pub const DEFAULT_SPREAD: f32 = 10.0;
