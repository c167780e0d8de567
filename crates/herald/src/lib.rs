//! # HERALD
//!
//! Replicated, animated titles above entity names.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         LABEL ENGINE                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌───────────────┐    ┌───────────────┐    ┌───────────────┐   │
//! │  │ herald_shared │───>│  herald_ui    │    │ herald_       │   │
//! │  │               │    │               │    │ networking    │   │
//! │  │  • Profile    │    │  • Animators  │    │  • Codec      │   │
//! │  │  • EntityId   │    │  • Colorize   │    │  • Transport  │   │
//! │  │  • Defaults   │    │  • Nameplates │    │  • Store      │   │
//! │  └───────┬───────┘    └───────┬───────┘    └───────┬───────┘   │
//! │          └────────────────────┼────────────────────┘           │
//! │                               v                                 │
//! │                     ┌───────────────────┐                       │
//! │                     │  herald (engine)  │                       │
//! │                     │  • Tick ordering  │                       │
//! │                     │  • Config (TOML)  │                       │
//! │                     └───────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: engine knobs loaded from TOML
//! - `engine`: one peer's replicated label state
//! - `roster`: in-memory entity names for standalone sessions
//! - `tick`: fixed-step tick clock

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod roster;
pub mod tick;

pub use herald_networking as networking;
pub use herald_shared as shared;
pub use herald_ui as ui;

pub use config::{ConfigError, ConfigResult, EngineConfig, DEFAULT_INBOUND_CAPACITY};
pub use engine::LabelEngine;
pub use roster::Roster;
pub use tick::{TickClock, MAX_CATCH_UP};
