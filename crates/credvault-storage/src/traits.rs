//! The record store contract.

use std::sync::Arc;

use async_trait::async_trait;
use credvault_crypto::KeyHash;

use crate::errors::Result;
use crate::record::Record;

/// Abstract key/value backend holding encrypted credential records.
///
/// Operations are futures; dropping a future cancels the operation.
/// Backends must tolerate cancellation at any await point; a cancelled
/// `put` that already committed is not rolled back.
///
/// Consistency: for a given key hash, a backend must provide
/// read-after-write within a single client session. Across clients it may
/// be looser; the database does not tighten it.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Insert a record under `key_hash`.
    ///
    /// Must be atomic put-if-absent and fail with
    /// [`StorageError::AlreadyExists`](crate::StorageError::AlreadyExists)
    /// if any record, live or invalidated, exists under the hash. The
    /// envelope's nonce discipline depends on this.
    async fn put(&self, key_hash: KeyHash, record: Record) -> Result<()>;

    /// Fetch the record under `key_hash`, or `None` if absent.
    ///
    /// An invalidated record yields
    /// [`StorageError::Invalidated`](crate::StorageError::Invalidated)
    /// instead of its contents.
    async fn get(&self, key_hash: &KeyHash) -> Result<Option<Record>>;

    /// Remove the record under `key_hash`. Idempotent: succeeds whether or
    /// not a record existed.
    async fn delete(&self, key_hash: &KeyHash) -> Result<()>;

    /// Mark the record under `key_hash` so later `get` calls no longer
    /// return live credential material. The record itself is kept so the
    /// reason stays auditable. A missing record is not an error.
    async fn invalidate(&self, key_hash: &KeyHash, reason: &str) -> Result<()>;

    /// Backend health check.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn put(&self, key_hash: KeyHash, record: Record) -> Result<()> {
        (**self).put(key_hash, record).await
    }

    async fn get(&self, key_hash: &KeyHash) -> Result<Option<Record>> {
        (**self).get(key_hash).await
    }

    async fn delete(&self, key_hash: &KeyHash) -> Result<()> {
        (**self).delete(key_hash).await
    }

    async fn invalidate(&self, key_hash: &KeyHash, reason: &str) -> Result<()> {
        (**self).invalidate(key_hash, reason).await
    }

    async fn ping(&self) -> Result<()> {
        (**self).ping().await
    }
}
