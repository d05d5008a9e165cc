//! Connection Management Module
//!
//! This module manages individual client connections. Each accepted socket
//! is handled by its own async task, so the server multiplexes thousands of
//! clients without any connection blocking another.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                     (main.rs)                               │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌───────────────┐   │
//! │  │ Read bytes  │───>│ Parse request│───>│ Dispatch to   │   │
//! │  └─────────────┘    └──────────────┘    │ storage task  │   │
//! │                                         └───────┬───────┘   │
//! │                                                 ▼           │
//! │                                         ┌───────────────┐   │
//! │                                         │  Send reply   │   │
//! │                                         └───────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Async I/O**: Non-blocking reads and writes driven by the runtime's
//!   readiness reactor; partial writes are retried by the write path itself
//! - **Buffer Management**: A growable `BytesMut` accumulates partial input
//! - **Pipelining**: Multiple requests in a single TCP segment all get served
//! - **Statistics**: Connection and command counters shared with the server

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
