//! Append-Only Durability Log
//!
//! This module provides the persistence layer for EmberKV. Every mutation the
//! storage engine applies is recorded as one line in an append-only log, and
//! replaying that log from the start reconstructs the full logical key space,
//! including keys long since evicted from the bounded cache.
//!
//! ## Record Kinds
//!
//! - `SET key value` - a write
//! - `DEL key` - a deletion
//! - `FLUSH key` - an eviction marker (audit only, never read back)
//!
//! ## Modules
//!
//! - `record`: The [`Record`] type and its line codec
//! - `store`: The [`AofStore`] trait with [`FileAof`] and [`MemoryAof`]
//!
//! ## Example
//!
//! ```
//! use emberkv::aof::{AofStore, MemoryAof, Record};
//! use bytes::Bytes;
//!
//! let log = MemoryAof::new();
//! let mut store = log.clone();
//!
//! store.append(&Record::Set {
//!     key: Bytes::from("name"),
//!     value: Bytes::from("alice"),
//! }).unwrap();
//!
//! assert_eq!(log.replay().unwrap().len(), 1);
//! ```

pub mod record;
pub mod store;

// Re-export commonly used types
pub use record::Record;
pub use store::{AofStore, FileAof, MemoryAof};
