//! Incremental Request Parser
//!
//! This module parses client requests out of a raw byte buffer. A request is
//! an array of bulk strings:
//!
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<len bytes>\r\n      (repeated argc times)
//! ```
//!
//! ## How the Parser Works
//!
//! [`parse_request`] attempts to parse exactly one complete request starting
//! at offset 0 of the buffer and returns either:
//!
//! - `Some((tokens, consumed))` - a complete request; `consumed` bytes were used
//! - `None` - not yet available
//!
//! "Not yet available" deliberately covers both a partially arrived request
//! and a buffer whose leading bytes do not form a valid request. The two
//! cases are never told apart: the caller keeps the buffer and waits for more
//! bytes, so a connection that sends a prefix that can never parse simply
//! stalls rather than being closed.
//!
//! The function is pure and stateless. The caller appends incoming network
//! data to a buffer, calls `parse_request`, drops `consumed` bytes from the
//! front on success, and re-invokes to extract any further pipelined
//! requests.

use crate::protocol::types::{prefix, CRLF};
use bytes::Bytes;

/// Attempts to parse one complete request from the start of `buf`.
///
/// # Returns
///
/// - `Some((tokens, consumed))` - the request's arguments in order, and the
///   number of bytes they occupied on the wire
/// - `None` - the buffer does not (yet) hold a complete request
///
/// # Example
///
/// ```
/// use emberkv::protocol::parse_request;
///
/// let buf = b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n";
/// let (tokens, consumed) = parse_request(buf).unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(consumed, buf.len());
///
/// // Every strict prefix is "not yet available".
/// assert!(parse_request(&buf[..buf.len() - 1]).is_none());
/// ```
pub fn parse_request(buf: &[u8]) -> Option<(Vec<Bytes>, usize)> {
    if buf.is_empty() || buf[0] != prefix::ARRAY {
        return None;
    }

    let argc_end = find_crlf(&buf[1..])?;
    let argc = parse_length(&buf[1..1 + argc_end])?;
    let mut consumed = 1 + argc_end + 2;

    let mut tokens = Vec::with_capacity(argc.min(64));
    for _ in 0..argc {
        let (token, used) = parse_bulk(&buf[consumed..])?;
        tokens.push(token);
        consumed += used;
    }

    Some((tokens, consumed))
}

/// Parses a single bulk string: `$<len>\r\n<data>\r\n`.
fn parse_bulk(buf: &[u8]) -> Option<(Bytes, usize)> {
    if buf.is_empty() || buf[0] != prefix::BULK_STRING {
        return None;
    }

    let len_end = find_crlf(&buf[1..])?;
    let len = parse_length(&buf[1..1 + len_end])?;

    let data_start = 1 + len_end + 2;
    let total = data_start.checked_add(len)?.checked_add(2)?;
    if buf.len() < total {
        return None;
    }

    if &buf[data_start + len..total] != CRLF {
        return None;
    }

    let data = Bytes::copy_from_slice(&buf[data_start..data_start + len]);
    Some((data, total))
}

/// Parses a non-negative decimal length made of ASCII digits only.
///
/// Leading zeros are accepted; signs, whitespace, and anything else are not.
fn parse_length(digits: &[u8]) -> Option<usize> {
    if digits.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(usize::from(b - b'0'))?;
    }
    Some(n)
}

/// Finds the position of CRLF in the buffer.
///
/// Returns the position of `\r` if found, or None if CRLF is not present.
#[inline]
fn find_crlf(buf: &[u8]) -> Option<usize> {
    for i in 0..buf.len().saturating_sub(1) {
        if buf[i] == b'\r' && buf[i + 1] == b'\n' {
            return Some(i);
        }
    }
    None
}
