//! Durability Log Stores
//!
//! The storage engine does not own a file handle directly; it owns an
//! [`AofStore`] handed to it at construction. That keeps the engine testable
//! against an in-memory store that captures appended records, while
//! production uses [`FileAof`].
//!
//! Both stores share the line format defined in [`super::record`].

use crate::aof::Record;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// An append-only record store.
///
/// `append` must make the record part of the log before returning; `replay`
/// must yield every record in append order. The log is never rewritten or
/// compacted, so replaying `SET`/`DEL` in order over an empty map always
/// reconstructs the full logical key space.
pub trait AofStore: Send {
    /// Appends one record to the log.
    fn append(&mut self, record: &Record) -> io::Result<()>;

    /// Reads the whole log from the beginning, in append order.
    fn replay(&self) -> io::Result<Vec<Record>>;
}

/// A durability log backed by a single append-only file.
///
/// One record per line. Appends are written straight through to the file;
/// there is no per-record fsync, so durability is to the OS, not the platter.
pub struct FileAof {
    path: PathBuf,
    file: File,
}

impl FileAof {
    /// Opens the log file, creating it if it does not exist.
    ///
    /// Existing contents are preserved; new records are appended at the end.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// The path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AofStore for FileAof {
    fn append(&mut self, record: &Record) -> io::Result<()> {
        let mut line = Vec::with_capacity(32);
        record.encode_line(&mut line);
        self.file.write_all(&line)
    }

    fn replay(&self) -> io::Result<Vec<Record>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // A log that was never written is an empty log.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut reader = BufReader::new(file);
        let mut records = Vec::new();
        let mut line = Vec::new();

        loop {
            line.clear();
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.is_empty() {
                continue;
            }
            match Record::parse_line(&line) {
                Some(record) => records.push(record),
                None => {
                    warn!(
                        path = %self.path.display(),
                        "skipping unparseable line in durability log"
                    );
                }
            }
        }

        Ok(records)
    }
}

/// An in-memory durability log.
///
/// Captures every appended record behind a shared handle, so a test can keep
/// a clone while the engine owns the store, then inspect exactly what was
/// logged. Replay works the same way as for [`FileAof`], which makes the
/// cold-miss path testable without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryAof {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryAof {
    /// Creates an empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every record appended so far, in order.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl AofStore for MemoryAof {
    fn append(&mut self, record: &Record) -> io::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn replay(&self) -> io::Result<Vec<Record>> {
        Ok(self.records())
    }
}
