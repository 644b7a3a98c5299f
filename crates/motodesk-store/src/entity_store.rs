//! Type-safe entity storage with generic key types.
//!
//! `EntityStore<K, V>` gives each entity family typed CRUD over a shared
//! `StorageBackend` partition, with compile-time key safety so a `BayId`
//! can never be used to look up a job card.
//!
//! ## Architecture
//!
//! ```text
//! EntityStore<K, V>        <- Typed entity CRUD with generic keys (this file)
//!     |
//! StorageBackend           <- Generic K/V operations (storage_trait.rs)
//!     |
//! InMemoryBackend          <- Actual storage implementation
//! ```

use crate::storage_trait::{Partition, Result, StorageBackend, StorageError};
use motodesk_commons::StorageKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for typed entity storage with type-safe keys and automatic
/// serialization.
///
/// ## Type Parameters
/// - `K`: Key type that implements StorageKey (UserId, JobCardId, or an
///   encoded composite key as `Vec<u8>`)
/// - `V`: Value/entity type that must be Serialize + Deserialize
///
/// ## Required Methods
/// - `backend()`: Returns reference to the storage backend
/// - `partition()`: Returns partition name for this entity type
///
/// Provided methods cover put/get/delete, atomic batch writes, and
/// prefix/limit scans. Serialization defaults to JSON.
pub trait EntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    /// Returns a reference to the storage backend.
    fn backend(&self) -> &Arc<dyn StorageBackend>;

    /// Returns the partition name for this entity type.
    ///
    /// Examples: "users", "job_cards", "points_ledger"
    fn partition(&self) -> &str;

    /// Serializes an entity to bytes. Default implementation uses JSON.
    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Deserializes bytes to an entity. Default implementation uses JSON.
    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Stores an entity with the given key.
    fn put(&self, key: &K, entity: &V) -> Result<()> {
        let partition = Partition::new(self.partition());
        let value = self.serialize(entity)?;
        self.backend().put(&partition, &key.storage_key(), &value)
    }

    /// Stores multiple entities atomically in a batch.
    ///
    /// All writes succeed or all fail.
    fn batch_put(&self, entries: &[(K, V)]) -> Result<()> {
        use crate::storage_trait::Operation;

        let partition = Partition::new(self.partition());
        let operations: Result<Vec<Operation>> = entries
            .iter()
            .map(|(key, entity)| {
                let value = self.serialize(entity)?;
                Ok(Operation::Put {
                    partition: partition.clone(),
                    key: key.storage_key(),
                    value,
                })
            })
            .collect();

        self.backend().batch(operations?)
    }

    /// Retrieves an entity by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get(&self, key: &K) -> Result<Option<V>> {
        let partition = Partition::new(self.partition());
        match self.backend().get(&partition, &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Deletes an entity by key.
    ///
    /// Returns `Ok(())` even if the key doesn't exist (idempotent).
    fn delete(&self, key: &K) -> Result<()> {
        let partition = Partition::new(self.partition());
        self.backend().delete(&partition, &key.storage_key())
    }

    /// Scans entities with keys matching the given prefix.
    ///
    /// Returns (raw key, entity) pairs in ascending key order.
    fn scan_prefix(&self, prefix: &K) -> Result<Vec<(Vec<u8>, V)>> {
        self.scan_with_prefix_bytes(Some(&prefix.storage_key()), None)
    }

    /// Scans all entities in the partition.
    ///
    /// **Warning**: This loads all entities into memory. A hard cap stops
    /// runaway scans on oversized partitions.
    fn scan_all(&self) -> Result<Vec<(Vec<u8>, V)>> {
        const MAX_SCAN_LIMIT: usize = 100000;

        let results = self.scan_with_prefix_bytes(None, Some(MAX_SCAN_LIMIT))?;
        if results.len() >= MAX_SCAN_LIMIT {
            log::warn!(
                "Scan of partition '{}' reached max limit of {} entries, stopping early",
                self.partition(),
                MAX_SCAN_LIMIT
            );
        }
        Ok(results)
    }

    /// Scans entities with an optional byte prefix and an optional limit.
    ///
    /// This is the primitive the other scan methods build on; use it directly
    /// when the prefix is an encoded composite key rather than a typed `K`.
    fn scan_with_prefix_bytes(
        &self,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, V)>> {
        let partition = Partition::new(self.partition());
        let iter = self.backend().scan(&partition, prefix, limit)?;

        let mut results = Vec::new();
        for (key_bytes, value_bytes) in iter {
            let entity = self.deserialize(&value_bytes)?;
            results.push((key_bytes, entity));
        }

        Ok(results)
    }

    /// Scans entities limited to `limit` results (no prefix).
    fn scan_limited(&self, limit: usize) -> Result<Vec<(Vec<u8>, V)>> {
        self.scan_with_prefix_bytes(None, Some(limit))
    }
}
