//! Storage Engine
//!
//! The engine ties the bounded [`LruCache`] to the durability log: the cache
//! is a fast window over the log's key space, and the log is the source of
//! truth for everything the cache has evicted.
//!
//! ## Write Path
//!
//! `set` and `del` mutate the cache and append their record before
//! returning, so the log always reflects an acknowledged mutation. When a
//! new key pushes the cache past capacity, the evicted key is recorded with
//! a `FLUSH` marker ahead of the `SET`.
//!
//! ## Read Path
//!
//! `get` serves resident keys in O(1). A miss falls back to a replay of the
//! whole log, last `SET`/`DEL` for the key winning; `FLUSH` markers are
//! ignored. A value recovered that way is re-inserted through the normal
//! write path, which appends a fresh `SET` and may evict the current tail.
//! The cold path is O(log length) by design; it trades speed for a very
//! simple log format.
//!
//! ## Failure Policy
//!
//! Append failures do not fail the command: the in-memory mutation stands
//! and a warning is logged. The client sees success while durability has
//! silently regressed. That matches the documented baseline behavior of the
//! log layer rather than promoting every disk hiccup to a client error.

use crate::aof::{AofStore, Record};
use crate::storage::LruCache;
use bytes::Bytes;
use tracing::{debug, warn};

/// A bounded LRU key-value store backed by an append-only log.
pub struct StorageEngine {
    cache: LruCache,
    aof: Box<dyn AofStore>,
}

impl StorageEngine {
    /// Creates an engine with the given cache capacity and log store.
    ///
    /// The log store is injected so tests can substitute an in-memory
    /// implementation and inspect exactly what was appended.
    pub fn new(capacity: usize, aof: Box<dyn AofStore>) -> Self {
        Self {
            cache: LruCache::new(capacity),
            aof,
        }
    }

    /// Rebuilds resident state from the log.
    ///
    /// Applies `SET`/`DEL` records in file order through a non-logging
    /// insertion path; `FLUSH` markers are skipped. Nothing is appended
    /// while the log is being replayed, so evictions during recovery are
    /// silent (the evicted data is still in the log). Must run to completion
    /// before the engine serves its first command.
    ///
    /// Returns the number of records applied.
    pub fn recover(&mut self) -> usize {
        let records = match self.aof.replay() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not replay durability log; starting empty");
                return 0;
            }
        };

        let mut applied = 0;
        for record in records {
            match record {
                Record::Set { key, value } => {
                    self.cache.insert(key, value);
                    applied += 1;
                }
                Record::Del { key } => {
                    self.cache.remove(&key);
                    applied += 1;
                }
                Record::Flush { .. } => {}
            }
        }

        debug!(
            applied,
            resident = self.cache.len(),
            "recovered state from durability log"
        );
        applied
    }

    /// Stores a value, evicting the least recently used entry if the key is
    /// new and the cache is full.
    ///
    /// The eviction (if any) is logged as `FLUSH`, then the write itself is
    /// logged as `SET`, before this call returns.
    pub fn set(&mut self, key: Bytes, value: Bytes) {
        if let Some(evicted) = self.cache.insert(key.clone(), value.clone()) {
            self.append(Record::Flush { key: evicted });
        }
        self.append(Record::Set { key, value });
    }

    /// Reads a value.
    ///
    /// Resident keys are answered from the cache and marked most recently
    /// used. A miss is resolved against the log; a key whose last record is
    /// a `SET` is re-inserted through [`StorageEngine::set`] and returned,
    /// anything else is a miss.
    pub fn get(&mut self, key: &[u8]) -> Option<Bytes> {
        if let Some(value) = self.cache.get(key) {
            return Some(value);
        }

        let value = self.lookup_in_log(key)?;
        debug!(key_len = key.len(), "cold miss served from durability log");
        self.set(Bytes::copy_from_slice(key), value.clone());
        Some(value)
    }

    /// Deletes a key, returning whether it was live.
    ///
    /// A resident key is removed from the cache and logged as `DEL`. A key
    /// that is not resident may still be live in the log (evicted but never
    /// deleted); in that case a `DEL` is appended so replay sees the key as
    /// gone. A key with no live history answers false and logs nothing.
    pub fn del(&mut self, key: &[u8]) -> bool {
        if self.cache.remove(key).is_some() {
            self.append(Record::Del {
                key: Bytes::copy_from_slice(key),
            });
            return true;
        }

        if self.lookup_in_log(key).is_some() {
            self.append(Record::Del {
                key: Bytes::copy_from_slice(key),
            });
            return true;
        }

        false
    }

    /// Number of resident keys.
    pub fn resident_len(&self) -> usize {
        self.cache.len()
    }

    /// The configured cache capacity.
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Resolves a key against the full log: last `SET`/`DEL` wins, `FLUSH`
    /// is ignored. `Some(value)` means the key is logically live.
    fn lookup_in_log(&self, key: &[u8]) -> Option<Bytes> {
        let records = match self.aof.replay() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not replay durability log for lookup");
                return None;
            }
        };

        let mut latest = None;
        for record in &records {
            match record {
                Record::Set { key: k, value } if k.as_ref() == key => {
                    latest = Some(value.clone());
                }
                Record::Del { key: k } if k.as_ref() == key => {
                    latest = None;
                }
                _ => {}
            }
        }
        latest
    }

    fn append(&mut self, record: Record) {
        if let Err(e) = self.aof.append(&record) {
            warn!(
                error = %e,
                "durability log append failed; in-memory state keeps the mutation"
            );
        }
    }
}
