//! Storage Module
//!
//! This module provides the in-memory side of EmberKV: a fixed-capacity,
//! LRU-evicted cache and the engine that pairs it with the durability log.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │                                                             │
//! │   ┌──────────────────────┐     ┌─────────────────────────┐  │
//! │   │       LruCache       │     │   Box<dyn AofStore>     │  │
//! │   │  index ──> slot arena│     │  append / replay        │  │
//! │   │  recency linked list │     │  (injected at new())    │  │
//! │   └──────────────────────┘     └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is deliberately single-owner: it is `&mut self` throughout and
//! contains no locks. Concurrency is handled one level up by the storage
//! service task, which is the only holder of the engine.
//!
//! ## Example
//!
//! ```
//! use emberkv::aof::MemoryAof;
//! use emberkv::storage::StorageEngine;
//! use bytes::Bytes;
//!
//! let mut engine = StorageEngine::new(2, Box::new(MemoryAof::new()));
//!
//! engine.set(Bytes::from("a"), Bytes::from("1"));
//! engine.set(Bytes::from("b"), Bytes::from("2"));
//! engine.set(Bytes::from("c"), Bytes::from("3")); // evicts "a"
//!
//! // "a" is no longer resident but is still served from the log.
//! assert_eq!(engine.get(b"a"), Some(Bytes::from("1")));
//! ```

pub mod cache;
pub mod engine;

// Re-export commonly used types
pub use cache::LruCache;
pub use engine::StorageEngine;
