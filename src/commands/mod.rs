//! Command Processing Module
//!
//! This module is the bridge between parsed wire requests and the storage
//! engine. Token sequences become typed [`Command`]s, commands travel over a
//! channel into the single storage service task, and replies come back per
//! request.
//!
//! ## Architecture
//!
//! ```text
//! Connection task                       Storage service task
//!       │                                       │
//!       │  Command::from_tokens(tokens)         │
//!       │                                       │
//!       ▼                                       ▼
//! ┌─────────────────┐   bounded mpsc    ┌─────────────────┐
//! │  StorageHandle  │ ────────────────> │ CommandHandler  │
//! │   .execute()    │ <──────────────── │  StorageEngine  │
//! └─────────────────┘   oneshot reply   └─────────────────┘
//! ```
//!
//! Invalid token sequences (unknown name, wrong arity) never reach the
//! service: the connection answers them locally with an error reply.

pub mod handler;
pub mod service;

// Re-export the command types and the service entry points
pub use handler::{Command, CommandError, CommandHandler};
pub use service::{start_storage_service, StorageHandle, COMMAND_QUEUE_DEPTH};
