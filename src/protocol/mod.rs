//! Wire Protocol Implementation
//!
//! This module implements EmberKV's binary-safe wire protocol: requests are
//! arrays of length-prefixed bulk strings, replies are simple strings, bulk
//! strings, integers, or errors.
//!
//! ## Overview
//!
//! A request is `*<argc>\r\n` followed by `argc` repetitions of
//! `$<len>\r\n<len bytes>\r\n`. Because every payload carries an explicit
//! length, keys and values may contain any byte, including `\r\n`.
//!
//! ## Modules
//!
//! - `types`: Defines the [`Reply`] enum and its serialization
//! - `parser`: Incremental parser for incoming request bytes
//!
//! ## Example
//!
//! ```
//! use emberkv::protocol::{parse_request, Reply};
//! use bytes::Bytes;
//!
//! // Parsing an incoming request
//! let data = b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n";
//! let (tokens, consumed) = parse_request(data).unwrap();
//! assert_eq!(tokens[0], Bytes::from("GET"));
//! assert_eq!(consumed, data.len());
//!
//! // Creating a reply
//! let reply = Reply::Bulk(Bytes::from("alice"));
//! assert_eq!(reply.serialize(), b"$5\r\nalice\r\n");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used items for convenience
pub use parser::parse_request;
pub use types::Reply;
