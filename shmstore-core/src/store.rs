// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Keyed shared memory store.
//!
//! Maps string identifiers to fixed-size System V segments.
//! Lifecycle per identifier: Unopened → Open (first write/read) → Unopened (delete).

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::shm::padding;
use crate::shm::Segment;
use crate::types::{Capacity, SegmentKey};

/// Byte-level operations of a keyed shared memory store.
pub trait SharedMemory {
    /// Overwrite the slot for `identifier` with `data`, padded to the segment size.
    fn write(&mut self, data: &[u8], identifier: &str) -> StoreResult<bool>;

    /// Read the slot for `identifier`, trimmed of surrounding whitespace.
    fn read(&mut self, identifier: &str) -> StoreResult<Vec<u8>>;

    /// Destroy the slot for `identifier`. Returns false if nothing was open.
    fn delete(&mut self, identifier: &str) -> bool;
}

/// Shared memory store backed by one segment per identifier.
///
/// Handles are opened lazily and cached for the lifetime of the store.
/// Dropping the store detaches its handles but never destroys segments;
/// they persist at the OS level until some process deletes them.
///
/// No locking is performed. Concurrent writers in other processes race
/// with last-writer-wins semantics.
#[derive(Debug)]
pub struct SharedMemoryStore {
    /// Size of every segment managed by this store.
    capacity: Capacity,
    /// Open handles by identifier.
    handles: HashMap<String, Segment>,
}

impl SharedMemoryStore {
    /// Create a store whose segments are `capacity` bytes.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            handles: HashMap::new(),
        }
    }

    /// Create a store from a validated configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Get the segment capacity.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Key of the segment an identifier resolves to.
    pub fn key_for(identifier: &str) -> SegmentKey {
        SegmentKey::from_identifier(identifier)
    }

    /// Check if a handle for `identifier` is cached.
    pub fn is_open(&self, identifier: &str) -> bool {
        self.handles.contains_key(identifier)
    }

    /// Get the number of open handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if no handles are open.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Open (or create) the segment for `identifier` without touching its contents.
    ///
    /// Useful to take ownership of a segment created by another process so
    /// that it can be deleted.
    pub fn open(&mut self, identifier: &str) -> StoreResult<()> {
        self.segment(identifier).map(|_| ())
    }

    /// Resolve the cached handle or open a new one.
    fn segment(&mut self, identifier: &str) -> StoreResult<&mut Segment> {
        match self.handles.entry(identifier.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let key = SegmentKey::from_identifier(identifier);
                let segment = Segment::open_or_create(key, self.capacity.bytes())
                    .map_err(|e| StoreError::initialization(identifier, key, e))?;

                tracing::debug!(
                    identifier = %identifier,
                    key = %key,
                    capacity = self.capacity.bytes(),
                    "Opened shared memory slot"
                );
                Ok(entry.insert(segment))
            }
        }
    }
}

impl Default for SharedMemoryStore {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}

impl SharedMemory for SharedMemoryStore {
    fn write(&mut self, data: &[u8], identifier: &str) -> StoreResult<bool> {
        let capacity = self.capacity.bytes();
        let segment = self.segment(identifier)?;
        let key = segment.key();

        let padded = padding::pad(data, capacity);
        let written = segment
            .write_at(0, &padded)
            .map_err(|e| StoreError::initialization(identifier, key, e))?;

        if written != padded.len() {
            return Err(StoreError::DataIntegrity {
                identifier: identifier.to_string(),
                expected: padded.len(),
                written,
            });
        }

        Ok(true)
    }

    fn read(&mut self, identifier: &str) -> StoreResult<Vec<u8>> {
        let segment = self.segment(identifier)?;
        let raw = segment.read();
        Ok(padding::trim(&raw).to_vec())
    }

    fn delete(&mut self, identifier: &str) -> bool {
        let Some(segment) = self.handles.remove(identifier) else {
            return false;
        };

        match segment.destroy() {
            Ok(()) => {
                tracing::debug!(identifier = %identifier, "Deleted shared memory slot");
                true
            }
            Err(e) => {
                tracing::warn!(identifier = %identifier, error = %e, "Failed to delete shared memory slot");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique(label: &str) -> String {
        format!("store-unit-{}-{}", label, std::process::id())
    }

    fn store(capacity: usize) -> SharedMemoryStore {
        SharedMemoryStore::new(Capacity::new(capacity).unwrap())
    }

    #[test]
    fn test_default_capacity() {
        let store = SharedMemoryStore::default();
        assert_eq!(store.capacity().bytes(), 256);
        assert!(store.is_empty());
    }

    #[test]
    fn test_handles_opened_lazily_and_reused() {
        let id = unique("lazy");
        let mut store = store(64);
        assert!(!store.is_open(&id));

        store.write(b"one", &id).unwrap();
        assert!(store.is_open(&id));
        assert_eq!(store.len(), 1);

        store.write(b"two", &id).unwrap();
        store.read(&id).unwrap();
        assert_eq!(store.len(), 1);

        assert!(store.delete(&id));
        assert!(!store.is_open(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_untracked_returns_false() {
        let mut store = store(64);
        assert!(!store.delete(&unique("never-opened")));
    }

    #[test]
    fn test_open_without_write_reads_empty() {
        let id = unique("open");
        let mut store = store(32);
        store.open(&id).unwrap();
        assert!(store.is_open(&id));
        assert_eq!(store.read(&id).unwrap(), b"");
        assert!(store.delete(&id));
    }

    #[test]
    fn test_empty_identifier_round_trip() {
        // CRC32 of "" is 0, so the segment is private to this handle.
        let mut store = store(32);
        assert!(store.write(b"abc", "").unwrap());
        assert!(store.is_open(""));
        assert_eq!(store.read("").unwrap(), b"abc");
        assert!(store.delete(""));
    }

    #[test]
    fn test_delete_evicts_handle_when_destroy_fails() {
        let id = unique("destroyed-elsewhere");
        let mut store = store(32);
        store.write(b"doomed", &id).unwrap();

        // Remove the segment behind the store's back. Linux keeps an attached
        // segment's id valid, so also drop the store's attachment.
        let key = SharedMemoryStore::key_for(&id);
        let addr = store.handles[&id].addr();
        unsafe {
            let shm_id = libc::shmget(key.as_raw(), 32, 0);
            assert!(shm_id >= 0);
            assert_eq!(libc::shmctl(shm_id, libc::IPC_RMID, std::ptr::null_mut()), 0);
            assert_eq!(libc::shmdt(addr), 0);
        }

        assert!(!store.delete(&id));
        assert!(!store.is_open(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_key_for_matches_checksum() {
        assert_eq!(
            SharedMemoryStore::key_for("session-42").value(),
            crc32fast::hash(b"session-42")
        );
    }
}
