//! # Host Side
//!
//! The authoritative copy of every profile in the session.

mod store;

pub use store::{ReplicationStore, StoreChange};
