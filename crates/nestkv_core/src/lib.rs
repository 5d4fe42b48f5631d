//! # nestkv Core
//!
//! In-memory key/value store with nested transactions.
//!
//! This crate provides:
//! - A transactional store: a committed base map under a stack of
//!   overlays, one per open transaction block
//! - A value index answering "how many keys hold V" in constant time,
//!   kept consistent across begin, commit, and rollback
//! - A lock-guarded handle for sharing one store between threads
//!
//! The core performs no I/O. Command parsing and the read loop live in
//! `nestkv_cli`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod index;
mod shared;
mod stats;
mod store;
pub mod transaction;

pub use config::{Config, RollbackScope};
pub use error::{CoreError, CoreResult};
pub use index::ValueIndex;
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
