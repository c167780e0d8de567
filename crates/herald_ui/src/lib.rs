//! # HERALD UI
//!
//! Turns a profile plus a per-entity animator into the label string the
//! host engine displays above an entity.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      LABEL PIPELINE                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  Profile → AnimatorState → frame → colorize → render     │
//! │              ↑ tick(dt)      ↓         ↓         ↓        │
//! │          AnimatorSet     text slice  spans    Nameplate   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate touches the network or the clock; callers pass
//! `dt` in. Identical inputs give byte-identical output.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod animation;
pub mod colorize;
pub mod render;
pub mod style;

pub use animation::{
    AnimatorSet, AnimatorState, AnimatorTiming, Direction, TypewriterPhase, TYPEWRITER_CURSOR,
};
pub use colorize::colorize;
pub use render::{render_label, Nameplate, NameplateHost};
pub use style::Color;
