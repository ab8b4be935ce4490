//! In-memory reference backend.
//!
//! Backs the test suite and documents the store contract for real
//! backends: the mutex makes `put` an atomic put-if-absent, and
//! invalidation keeps the record (and its reason) while refusing to serve
//! the contents.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use credvault_crypto::KeyHash;

use crate::errors::{Result, StorageError};
use crate::record::Record;
use crate::traits::KeyValueStore;

#[derive(Debug, Clone)]
struct StoredEntry {
    record: Record,
    invalidation_reason: Option<String>,
}

/// A `HashMap`-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<KeyHash, StoredEntry>>,
}

/// Recover the guard from a poisoned mutex. The map holds no invariants a
/// panicking writer could have broken mid-flight, so the data stays usable.
fn lock_entries(
    mutex: &Mutex<HashMap<KeyHash, StoredEntry>>,
) -> MutexGuard<'_, HashMap<KeyHash, StoredEntry>> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("memory store mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn put(&self, key_hash: KeyHash, record: Record) -> Result<()> {
        let mut entries = lock_entries(&self.entries);
        match entries.entry(key_hash) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(StoredEntry {
                    record,
                    invalidation_reason: None,
                });
                Ok(())
            }
        }
    }

    async fn get(&self, key_hash: &KeyHash) -> Result<Option<Record>> {
        let entries = lock_entries(&self.entries);
        match entries.get(key_hash) {
            None => Ok(None),
            Some(entry) if entry.invalidation_reason.is_some() => {
                Err(StorageError::Invalidated)
            }
            Some(entry) => Ok(Some(entry.record.clone())),
        }
    }

    async fn delete(&self, key_hash: &KeyHash) -> Result<()> {
        lock_entries(&self.entries).remove(key_hash);
        Ok(())
    }

    async fn invalidate(&self, key_hash: &KeyHash, reason: &str) -> Result<()> {
        if let Some(entry) = lock_entries(&self.entries).get_mut(key_hash) {
            entry.invalidation_reason = Some(reason.to_string());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record(tag: u8) -> Record {
        Record {
            satellite_address: "id@sat1.example.test:7777".to_string(),
            macaroon_head: vec![tag; 32],
            encrypted_secret_key: vec![tag; 48],
            encrypted_access_grant: vec![tag; 64],
            public: false,
        }
    }

    fn test_hash(tag: u8) -> KeyHash {
        KeyHash::from_bytes([tag; 32])
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        store.put(test_hash(1), test_record(1)).await.unwrap();
        let fetched = store.get(&test_hash(1)).await.unwrap();
        assert_eq!(fetched, Some(test_record(1)));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(&test_hash(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_put_keeps_original() {
        let store = MemoryStore::new();
        store.put(test_hash(1), test_record(1)).await.unwrap();

        let err = store.put(test_hash(1), test_record(2)).await.unwrap_err();
        assert_eq!(err, StorageError::AlreadyExists);

        let fetched = store.get(&test_hash(1)).await.unwrap();
        assert_eq!(fetched, Some(test_record(1)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put(test_hash(1), test_record(1)).await.unwrap();
        store.delete(&test_hash(1)).await.unwrap();
        store.delete(&test_hash(1)).await.unwrap();
        assert_eq!(store.get(&test_hash(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidated_record_is_withheld() {
        let store = MemoryStore::new();
        store.put(test_hash(1), test_record(1)).await.unwrap();
        store.invalidate(&test_hash(1), "abuse").await.unwrap();

        let err = store.get(&test_hash(1)).await.unwrap_err();
        assert_eq!(err, StorageError::Invalidated);
    }

    #[tokio::test]
    async fn test_invalidated_record_still_blocks_put() {
        let store = MemoryStore::new();
        store.put(test_hash(1), test_record(1)).await.unwrap();
        store.invalidate(&test_hash(1), "abuse").await.unwrap();

        let err = store.put(test_hash(1), test_record(2)).await.unwrap_err();
        assert_eq!(err, StorageError::AlreadyExists);
    }

    #[tokio::test]
    async fn test_invalidate_missing_is_noop() {
        let store = MemoryStore::new();
        store.invalidate(&test_hash(1), "abuse").await.unwrap();
        assert_eq!(store.get(&test_hash(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryStore::new().ping().await.is_ok());
    }
}
