//! # motodesk-store
//!
//! Key-value storage abstraction for MotoDesk. This crate isolates all
//! direct storage interactions so motodesk-core stays free of storage
//! engine details.
//!
//! ## Architecture
//!
//! ```text
//! motodesk-core (business logic)
//!     |
//! motodesk-store (typed K/V operations)
//!     |
//! InMemoryBackend (ordered in-process storage)
//! ```
//!
//! Each entity family lives in its own partition ("users", "job_cards",
//! "points_ledger", ...). Typed access goes through `EntityStore<K, V>`;
//! history-style data (audit trails, points ledgers, attendance) uses
//! order-preserving composite keys so prefix scans return entries in time
//! order.

pub mod entity_store;
pub mod memory;
pub mod storage_trait;

pub use entity_store::EntityStore;
pub use memory::InMemoryBackend;
pub use storage_trait::{
    KvIterator, Operation, Partition, StorageBackend, StorageError,
};

// Re-export StorageKey from motodesk-commons to avoid import inconsistency
pub use motodesk_commons::StorageKey;
