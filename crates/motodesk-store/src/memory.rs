//! In-memory storage backend.
//!
//! Backs the server's data with ordered `BTreeMap`s, one per partition, so
//! prefix scans over storekey-encoded composite keys come back in key order
//! exactly like they would from an on-disk engine. All state is process-local
//! and lost on restart.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

use crate::storage_trait::{
    KvIterator, Operation, Partition, Result, StorageBackend, StorageError,
};

/// Thread-safe in-memory backend.
///
/// A single `RwLock` guards the partition map; reads take the shared lock,
/// writes and batches take the exclusive lock, which is what makes `batch`
/// atomic with respect to concurrent readers.
pub struct InMemoryBackend {
    inner: RwLock<HashMap<String, BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Create a backend with the given partitions already present.
    pub fn with_partitions(names: &[&str]) -> Self {
        let backend = Self::new();
        {
            let mut inner = backend.inner.write();
            for name in names {
                inner.entry((*name).to_string()).or_default();
            }
        }
        backend
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.read();
        let map = inner
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write();
        let map = inner
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut inner = self.inner.write();
        let map = inner
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut inner = self.inner.write();

        // Validate all partitions up front so a failure applies nothing
        for op in &operations {
            let partition = match op {
                Operation::Put { partition, .. } => partition,
                Operation::Delete { partition, .. } => partition,
            };
            if !inner.contains_key(partition.name()) {
                return Err(StorageError::PartitionNotFound(
                    partition.name().to_string(),
                ));
            }
        }

        for op in operations {
            match op {
                Operation::Put {
                    partition,
                    key,
                    value,
                } => {
                    if let Some(map) = inner.get_mut(partition.name()) {
                        map.insert(key, value);
                    }
                }
                Operation::Delete { partition, key } => {
                    if let Some(map) = inner.get_mut(partition.name()) {
                        map.remove(&key);
                    }
                }
            }
        }

        Ok(())
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<KvIterator<'_>> {
        let inner = self.inner.read();
        let map = inner
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;

        let cap = limit.unwrap_or(usize::MAX);
        let mut results: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();

        match prefix {
            Some(p) => {
                for (k, v) in map.range(p.to_vec()..) {
                    if results.len() >= cap || !k.starts_with(p) {
                        break;
                    }
                    results.push((k.clone(), v.clone()));
                }
            }
            None => {
                for (k, v) in map.iter() {
                    if results.len() >= cap {
                        break;
                    }
                    results.push((k.clone(), v.clone()));
                }
            }
        }

        Ok(Box::new(results.into_iter()))
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.inner.read().contains_key(partition.name())
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        let mut inner = self.inner.write();
        inner.entry(partition.name().to_string()).or_default();
        Ok(())
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        let inner = self.inner.read();
        Ok(inner.keys().map(Partition::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> InMemoryBackend {
        InMemoryBackend::with_partitions(&["test"])
    }

    #[test]
    fn test_put_get_roundtrip() {
        let backend = backend();
        let partition = Partition::new("test");

        backend.put(&partition, b"key1", b"value1").unwrap();
        assert_eq!(
            backend.get(&partition, b"key1").unwrap(),
            Some(b"value1".to_vec())
        );
        assert_eq!(backend.get(&partition, b"missing").unwrap(), None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let backend = backend();
        let partition = Partition::new("test");

        backend.put(&partition, b"key1", b"value1").unwrap();
        backend.delete(&partition, b"key1").unwrap();
        backend.delete(&partition, b"key1").unwrap();
        assert_eq!(backend.get(&partition, b"key1").unwrap(), None);
    }

    #[test]
    fn test_missing_partition_is_an_error() {
        let backend = backend();
        let partition = Partition::new("nope");

        assert!(matches!(
            backend.get(&partition, b"key1"),
            Err(StorageError::PartitionNotFound(_))
        ));
        assert!(backend.put(&partition, b"key1", b"v").is_err());
    }

    #[test]
    fn test_create_partition_is_idempotent() {
        let backend = backend();
        let partition = Partition::new("extra");

        backend.create_partition(&partition).unwrap();
        backend.put(&partition, b"k", b"v").unwrap();
        backend.create_partition(&partition).unwrap();

        // Re-creating must not wipe existing data
        assert_eq!(backend.get(&partition, b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_scan_prefix_in_key_order() {
        let backend = backend();
        let partition = Partition::new("test");

        backend.put(&partition, b"cust_1/0002", b"b").unwrap();
        backend.put(&partition, b"cust_1/0001", b"a").unwrap();
        backend.put(&partition, b"cust_2/0001", b"x").unwrap();

        let results: Vec<_> = backend
            .scan(&partition, Some(b"cust_1/"), None)
            .unwrap()
            .collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, b"cust_1/0001".to_vec());
        assert_eq!(results[1].0, b"cust_1/0002".to_vec());
    }

    #[test]
    fn test_scan_respects_limit() {
        let backend = backend();
        let partition = Partition::new("test");

        for i in 0..10u8 {
            backend.put(&partition, &[i], b"v").unwrap();
        }

        let results: Vec<_> = backend.scan(&partition, None, Some(3)).unwrap().collect();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_batch_applies_nothing_on_bad_partition() {
        let backend = backend();
        let good = Partition::new("test");
        let bad = Partition::new("nope");

        let result = backend.batch(vec![
            Operation::Put {
                partition: good.clone(),
                key: b"k1".to_vec(),
                value: b"v1".to_vec(),
            },
            Operation::Put {
                partition: bad,
                key: b"k2".to_vec(),
                value: b"v2".to_vec(),
            },
        ]);

        assert!(result.is_err());
        assert_eq!(backend.get(&good, b"k1").unwrap(), None);
    }

    #[test]
    fn test_batch_mixed_put_delete() {
        let backend = backend();
        let partition = Partition::new("test");

        backend.put(&partition, b"gone", b"old").unwrap();
        backend
            .batch(vec![
                Operation::Put {
                    partition: partition.clone(),
                    key: b"kept".to_vec(),
                    value: b"new".to_vec(),
                },
                Operation::Delete {
                    partition: partition.clone(),
                    key: b"gone".to_vec(),
                },
            ])
            .unwrap();

        assert_eq!(
            backend.get(&partition, b"kept").unwrap(),
            Some(b"new".to_vec())
        );
        assert_eq!(backend.get(&partition, b"gone").unwrap(), None);
    }
}
