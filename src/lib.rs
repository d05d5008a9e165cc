//! # EmberKV - A Bounded LRU Key-Value Store with a Durability Log
//!
//! EmberKV is a small key-value database written in Rust. It keeps a bounded,
//! LRU-evicted working set in memory and records every mutation in an
//! append-only log, so data pushed out of memory can still be served and the
//! store survives a restart.
//!
//! ## Features
//!
//! - **Bounded Memory**: A fixed-capacity cache with least-recently-used eviction
//! - **Durability Log**: Every SET/DEL is appended to a log before the client is answered
//! - **Cold Reads**: Cache misses fall back to a replay of the log
//! - **Binary-Safe Protocol**: Length-prefixed bulk strings, values may contain any byte
//! - **Async I/O**: Built on Tokio for handling thousands of concurrent connections
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              EmberKV                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐             │
//! │  │ TCP Server  │───>│ Connection  │───>│  StorageHandle   │             │
//! │  │ (Listener)  │    │  Handler    │    │  (mpsc sender)   │             │
//! │  └─────────────┘    └─────────────┘    └────────┬─────────┘             │
//! │                                                 │                       │
//! │  ┌─────────────┐                                ▼                       │
//! │  │  Request    │    ┌──────────────────────────────────────────────┐    │
//! │  │  Parser     │    │        Storage Service (single task)         │    │
//! │  │             │    │  ┌────────────────┐   ┌───────────────────┐  │    │
//! │  └─────────────┘    │  │   LruCache     │   │   AofStore        │  │    │
//! │                     │  │ (bounded, O(1))│   │ (append + replay) │  │    │
//! │                     │  └────────────────┘   └───────────────────┘  │    │
//! │                     └──────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All cache and log state is owned by one storage service task. Connection
//! tasks parse requests from their own byte buffers and exchange commands and
//! replies with the service over channels, so log-append order always matches
//! the order mutations are applied, without any locking on the data path.
//!
//! ## Quick Start
//!
//! ```ignore
//! use emberkv::aof::FileAof;
//! use emberkv::commands::start_storage_service;
//! use emberkv::connection::{handle_connection, ConnectionStats};
//! use emberkv::storage::StorageEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let aof = FileAof::open("emberkv.aof")?;
//!     let mut engine = StorageEngine::new(1024, Box::new(aof));
//!
//!     // Rebuild resident state from the log before serving anything.
//!     engine.recover();
//!
//!     let (storage, _service) = start_storage_service(engine);
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:7379").await?;
//!     loop {
//!         let (stream, addr) = listener.accept().await?;
//!         tokio::spawn(handle_connection(
//!             stream,
//!             addr,
//!             storage.clone(),
//!             Arc::clone(&stats),
//!         ));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `SET key value` - Store a value and append `SET` to the log
//! - `GET key` - Read a value, falling back to a log replay on a cache miss
//! - `DEL key` - Remove a key, appending `DEL` when it was live
//!
//! ## Module Overview
//!
//! - [`protocol`]: Wire protocol parser and reply types
//! - [`aof`]: Append-only durability log (records, file store, in-memory store)
//! - [`storage`]: Bounded LRU cache and the storage engine
//! - [`commands`]: Command parsing/dispatch and the storage service task
//! - [`connection`]: Client connection management
//!
//! ## Design Highlights
//!
//! ### Single-Owner Storage
//!
//! The storage engine is not shared or locked. It lives inside one task that
//! consumes commands from a bounded channel and answers each over a oneshot
//! channel. A slow log append therefore delays queued commands rather than
//! corrupting ordering.
//!
//! ### Write-Through Log
//!
//! `SET` and `DEL` append their record synchronously before the reply is sent.
//! Eviction appends a `FLUSH` marker, which is bookkeeping only and is never
//! consulted when resolving a key.
//!
//! ### Cold Misses
//!
//! A `GET` that misses the cache scans the log from the beginning; the last
//! `SET`/`DEL` for the key wins. A hit from the log is re-inserted through the
//! normal write path, which may in turn evict the current LRU tail.

pub mod aof;
pub mod commands;
pub mod connection;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use aof::{AofStore, FileAof, MemoryAof, Record};
pub use commands::{start_storage_service, Command, CommandHandler, StorageHandle};
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{parse_request, Reply};
pub use storage::{LruCache, StorageEngine};

/// The default port EmberKV listens on
pub const DEFAULT_PORT: u16 = 7379;

/// The default host EmberKV binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// The default capacity of the in-memory cache (number of resident keys)
pub const DEFAULT_CAPACITY: usize = 1024;

/// The default path of the append-only durability log
pub const DEFAULT_AOF_PATH: &str = "emberkv.aof";

/// Version of EmberKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
