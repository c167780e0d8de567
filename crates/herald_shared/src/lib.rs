//! # HERALD Shared
//!
//! Common types used by every peer in a session.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - the transport
//! - the animation or color engine
//!
//! It only describes *what* an entity wants its label to look like.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod entity;
pub mod error;
pub mod profile;

pub use constants::{
    BLINK_INTERVAL_SECONDS, CLEANUP_INTERVAL_SECONDS, DEFAULT_COLOR_SPEED, DEFAULT_FRAME_SECONDS,
    DEFAULT_MARQUEE_WIDTH, DEFAULT_SPREAD, HOLD_DURATION_SECONDS, MAX_MARQUEE_WIDTH, TICK_RATE,
};
pub use entity::EntityId;
pub use error::{ProfileError, ProfileResult};
pub use profile::{
    AnimationKind, BracketStyle, Coloring, ColoringKind, Profile, SecondaryField, TextAnimation,
};
