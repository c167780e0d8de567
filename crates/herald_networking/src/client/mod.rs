//! # Peer Side
//!
//! What every peer (host included) renders from: a mirror fed by host
//! broadcasts and full syncs.

mod mirror;

pub use mirror::{MirrorChange, ProfileMirror};
