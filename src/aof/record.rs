//! Durability Log Records
//!
//! A record is one line in the append-only log:
//!
//! ```text
//! SET <key> <value>\n
//! DEL <key>\n
//! FLUSH <key>\n
//! ```
//!
//! Fields are space-separated and the value is the remainder of the line
//! verbatim. There is no escaping: a value must not contain the line
//! terminator and a key must not contain spaces or the line terminator.
//! That limitation is part of the format and is preserved on purpose.

use bytes::Bytes;

/// One entry in the append-only durability log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A write. Replay applies it as an insert/update.
    Set { key: Bytes, value: Bytes },

    /// A deletion. Replay applies it as a removal.
    Del { key: Bytes },

    /// An eviction marker, appended when a key is pushed out of the cache.
    /// Bookkeeping only: it carries no value and is ignored during lookup
    /// and replay.
    Flush { key: Bytes },
}

impl Record {
    /// The key this record is about.
    pub fn key(&self) -> &Bytes {
        match self {
            Record::Set { key, .. } => key,
            Record::Del { key } => key,
            Record::Flush { key } => key,
        }
    }

    /// Appends the record's line, including the trailing newline, to `buf`.
    pub fn encode_line(&self, buf: &mut Vec<u8>) {
        match self {
            Record::Set { key, value } => {
                buf.extend_from_slice(b"SET ");
                buf.extend_from_slice(key);
                buf.push(b' ');
                buf.extend_from_slice(value);
            }
            Record::Del { key } => {
                buf.extend_from_slice(b"DEL ");
                buf.extend_from_slice(key);
            }
            Record::Flush { key } => {
                buf.extend_from_slice(b"FLUSH ");
                buf.extend_from_slice(key);
            }
        }
        buf.push(b'\n');
    }

    /// Parses one log line (without its trailing newline).
    ///
    /// Returns `None` for lines that are not a well-formed record; replay
    /// skips those.
    pub fn parse_line(line: &[u8]) -> Option<Record> {
        let space = line.iter().position(|&b| b == b' ')?;
        let (tag, rest) = (&line[..space], &line[space + 1..]);

        match tag {
            b"SET" => {
                let space = rest.iter().position(|&b| b == b' ')?;
                Some(Record::Set {
                    key: Bytes::copy_from_slice(&rest[..space]),
                    value: Bytes::copy_from_slice(&rest[space + 1..]),
                })
            }
            b"DEL" => Some(Record::Del {
                key: Bytes::copy_from_slice(rest),
            }),
            b"FLUSH" => Some(Record::Flush {
                key: Bytes::copy_from_slice(rest),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &Record) -> Vec<u8> {
        let mut buf = Vec::new();
        record.encode_line(&mut buf);
        buf
    }

    #[test]
    fn test_encode_set() {
        let record = Record::Set {
            key: Bytes::from("name"),
            value: Bytes::from("alice"),
        };
        assert_eq!(encode(&record), b"SET name alice\n");
    }

    #[test]
    fn test_encode_del_and_flush() {
        let del = Record::Del { key: Bytes::from("name") };
        assert_eq!(encode(&del), b"DEL name\n");

        let flush = Record::Flush { key: Bytes::from("name") };
        assert_eq!(encode(&flush), b"FLUSH name\n");
    }

    #[test]
    fn test_parse_set() {
        let record = Record::parse_line(b"SET name alice").unwrap();
        assert_eq!(
            record,
            Record::Set {
                key: Bytes::from("name"),
                value: Bytes::from("alice"),
            }
        );
    }

    #[test]
    fn test_parse_set_value_is_remainder_of_line() {
        // Values keep their internal spaces verbatim.
        let record = Record::parse_line(b"SET greeting hello there world").unwrap();
        assert_eq!(
            record,
            Record::Set {
                key: Bytes::from("greeting"),
                value: Bytes::from("hello there world"),
            }
        );
    }

    #[test]
    fn test_parse_set_empty_value() {
        let record = Record::parse_line(b"SET k ").unwrap();
        assert_eq!(
            record,
            Record::Set {
                key: Bytes::from("k"),
                value: Bytes::new(),
            }
        );
    }

    #[test]
    fn test_parse_del_and_flush() {
        assert_eq!(
            Record::parse_line(b"DEL name").unwrap(),
            Record::Del { key: Bytes::from("name") }
        );
        assert_eq!(
            Record::parse_line(b"FLUSH name").unwrap(),
            Record::Flush { key: Bytes::from("name") }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Record::parse_line(b"").is_none());
        assert!(Record::parse_line(b"SET").is_none());
        assert!(Record::parse_line(b"SET keyonly").is_none());
        assert!(Record::parse_line(b"TRUNCATE name").is_none());
    }

    #[test]
    fn test_line_round_trip() {
        let records = [
            Record::Set { key: Bytes::from("a"), value: Bytes::from("1") },
            Record::Del { key: Bytes::from("a") },
            Record::Flush { key: Bytes::from("b") },
        ];
        for record in &records {
            let mut line = encode(record);
            assert_eq!(line.pop(), Some(b'\n'));
            assert_eq!(Record::parse_line(&line).as_ref(), Some(record));
        }
    }
}
