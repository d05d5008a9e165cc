//! Wire Protocol Reply Types
//!
//! This module defines the replies EmberKV sends back to clients and their
//! wire encoding.
//!
//! ## Encoding
//!
//! Each reply starts with a type prefix byte and ends with CRLF (`\r\n`):
//!
//! - `+` Simple String: `+OK\r\n`
//! - `-` Error: `-ERR unknown command\r\n`
//! - `:` Integer: `:1\r\n`
//! - `$` Bulk String: `$5\r\nalice\r\n`, or `$-1\r\n` for a missing value
//!
//! Bulk strings carry an explicit length, so a value may contain any byte
//! including `\r\n` itself.

use bytes::Bytes;

/// The CRLF terminator used throughout the wire protocol
pub const CRLF: &[u8] = b"\r\n";

/// Wire protocol type prefixes
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// A reply to a single client command.
///
/// This enum covers every response shape the server produces: `SET` answers
/// [`Reply::Ok`], `GET` answers [`Reply::Bulk`] or [`Reply::NullBulk`], `DEL`
/// answers [`Reply::Integer`], and invalid input answers [`Reply::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Successful mutation acknowledgment.
    /// Format: `+OK\r\n`
    Ok,

    /// A present value, binary-safe.
    /// Format: `$<length>\r\n<data>\r\n`
    Bulk(Bytes),

    /// A missing value.
    /// Format: `$-1\r\n`
    NullBulk,

    /// A numeric result, used for deletion existence (`:1` / `:0`).
    /// Format: `:<integer>\r\n`
    Integer(i64),

    /// An error condition; the connection stays open.
    /// Format: `-<message>\r\n`
    Error(String),
}

impl Reply {
    /// Creates an error reply.
    pub fn error(msg: impl Into<String>) -> Self {
        Reply::Error(msg.into())
    }

    /// Serializes the reply to bytes for sending over the wire.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    ///
    /// This is more efficient than `serialize()` when you want to reuse a buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Ok => {
                buf.push(prefix::SIMPLE_STRING);
                buf.extend_from_slice(b"OK");
                buf.extend_from_slice(CRLF);
            }
            Reply::Bulk(data) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            Reply::NullBulk => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
            Reply::Integer(n) => {
                buf.push(prefix::INTEGER);
                buf.extend_from_slice(n.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Error(msg) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(msg.as_bytes());
                buf.extend_from_slice(CRLF);
            }
        }
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serialize() {
        assert_eq!(Reply::Ok.serialize(), b"+OK\r\n");
    }

    #[test]
    fn test_bulk_serialize() {
        let reply = Reply::Bulk(Bytes::from("alice"));
        assert_eq!(reply.serialize(), b"$5\r\nalice\r\n");
    }

    #[test]
    fn test_empty_bulk_serialize() {
        let reply = Reply::Bulk(Bytes::new());
        assert_eq!(reply.serialize(), b"$0\r\n\r\n");
    }

    #[test]
    fn test_null_bulk_serialize() {
        assert_eq!(Reply::NullBulk.serialize(), b"$-1\r\n");
    }

    #[test]
    fn test_integer_serialize() {
        assert_eq!(Reply::Integer(1).serialize(), b":1\r\n");
        assert_eq!(Reply::Integer(0).serialize(), b":0\r\n");
    }

    #[test]
    fn test_error_serialize() {
        let reply = Reply::error("ERR unknown command 'FOO'");
        assert_eq!(reply.serialize(), b"-ERR unknown command 'FOO'\r\n");
    }

    #[test]
    fn test_binary_bulk_serialize() {
        // The length prefix makes embedded CRLF safe on the wire.
        let reply = Reply::Bulk(Bytes::from(&b"a\r\nb\x00c"[..]));
        assert_eq!(reply.serialize(), b"$7\r\na\r\nb\x00c\r\n");
    }

    #[test]
    fn test_serialize_into_appends() {
        let mut buf = Vec::new();
        Reply::Ok.serialize_into(&mut buf);
        Reply::Integer(0).serialize_into(&mut buf);
        assert_eq!(buf, b"+OK\r\n:0\r\n");
    }
}
