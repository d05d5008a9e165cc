//! Bounded LRU Cache
//!
//! A fixed-capacity map from key to value with least-recently-used eviction.
//!
//! ## Design
//!
//! Entries live in a dense slot arena. The key index maps each key to its
//! slot position, and the recency order is an intrusive doubly-linked list of
//! slot positions stored as `prev`/`next` fields on the slots themselves.
//! Using indices instead of pointers or iterators means nothing is
//! invalidated when the arena grows or a slot is recycled.
//!
//! ```text
//!  index: { "a" -> 2, "b" -> 0, "c" -> 1 }
//!
//!  slots:   [0]─────[1]─────[2]         head (most recent) = 0
//!           "b" <-> "c" <-> "a"         tail (least recent) = 2
//! ```
//!
//! `get`, `insert`, and `remove` are all O(1). Vacated slots go on a free
//! list and are reused before the arena grows.

use bytes::Bytes;
use std::collections::HashMap;

/// Sentinel index meaning "no slot".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Slot {
    key: Bytes,
    value: Bytes,
    prev: usize,
    next: usize,
}

/// A bounded map with LRU eviction.
///
/// Invariants, after every operation settles:
/// - the key index and the recency list contain exactly the same keys
/// - each key appears in the recency list exactly once
/// - the number of resident keys never exceeds the capacity
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    slots: Vec<Slot>,
    index: HashMap<Bytes, usize>,
    /// Most recently used slot, or NIL when empty.
    head: usize,
    /// Least recently used slot, or NIL when empty.
    tail: usize,
    free: Vec<usize>,
}

impl LruCache {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be at least 1");
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
        }
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if `key` is resident.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a resident key and marks it most recently used.
    pub fn get(&mut self, key: &[u8]) -> Option<Bytes> {
        let idx = *self.index.get(key)?;
        self.touch(idx);
        Some(self.slots[idx].value.clone())
    }

    /// Looks up a resident key without disturbing the recency order.
    pub fn peek(&self, key: &[u8]) -> Option<&Bytes> {
        let idx = *self.index.get(key)?;
        Some(&self.slots[idx].value)
    }

    /// Inserts or updates an entry, marking it most recently used.
    ///
    /// When inserting a NEW key into a full cache, the least recently used
    /// entry is evicted first and its key is returned. Updating an existing
    /// key never evicts.
    pub fn insert(&mut self, key: Bytes, value: Bytes) -> Option<Bytes> {
        if let Some(&idx) = self.index.get(&key) {
            self.slots[idx].value = value;
            self.touch(idx);
            return None;
        }

        let evicted = if self.index.len() == self.capacity {
            Some(self.evict_tail())
        } else {
            None
        };

        let idx = self.alloc(key.clone(), value);
        self.push_head(idx);
        self.index.insert(key, idx);
        evicted
    }

    /// Removes an entry, returning its value if it was resident.
    pub fn remove(&mut self, key: &[u8]) -> Option<Bytes> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let value = std::mem::take(&mut self.slots[idx].value);
        self.slots[idx].key = Bytes::new();
        self.free.push(idx);
        Some(value)
    }

    /// The current eviction candidate (least recently used key).
    pub fn tail_key(&self) -> Option<&Bytes> {
        if self.tail == NIL {
            None
        } else {
            Some(&self.slots[self.tail].key)
        }
    }

    /// Resident keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<Bytes> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut idx = self.head;
        while idx != NIL {
            keys.push(self.slots[idx].key.clone());
            idx = self.slots[idx].next;
        }
        keys
    }

    /// Removes the tail entry and returns its key. Must not be called on an
    /// empty cache.
    fn evict_tail(&mut self) -> Bytes {
        let idx = self.tail;
        debug_assert!(idx != NIL, "evict_tail on empty cache");
        self.unlink(idx);
        let key = std::mem::take(&mut self.slots[idx].key);
        self.slots[idx].value = Bytes::new();
        self.index.remove(&key);
        self.free.push(idx);
        key
    }

    /// Takes a slot from the free list or grows the arena.
    fn alloc(&mut self, key: Bytes, value: Bytes) -> usize {
        let slot = Slot {
            key,
            value,
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    /// Moves a linked slot to the head of the recency list.
    fn touch(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_head(idx);
        }
    }

    /// Detaches a slot from the recency list.
    fn unlink(&mut self, idx: usize) {
        let Slot { prev, next, .. } = self.slots[idx];
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    /// Links a detached slot in as the new head.
    fn push_head(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }
}
