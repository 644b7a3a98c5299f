//! Storage key trait for type-safe key serialization with lexicographic ordering.
//!
//! Keys are encoded with the `storekey` crate so that the encoded bytes sort
//! in the same order as the original values. The in-memory store keeps
//! partitions in sorted byte order, and store history scans rely on it:
//! audit trails and points ledgers use `(parent_id, timestamp, seq)`
//! composite keys so a prefix scan returns entries oldest-first, and
//! attendance uses `(staff_id, date)` so "one record per staff per day" is a
//! key-existence check.
//!
//! Naive encodings like `{len}{bytes}` break ordering ("bob" would sort
//! before "alice" because 3 < 5); storekey's escape-sequence encoding does
//! not have that problem.
//!
//! # Usage for Composite Keys
//!
//! ```rust,ignore
//! use motodesk_commons::{StorageKey, encode_key, decode_key};
//!
//! impl StorageKey for AttendanceKey {
//!     fn storage_key(&self) -> Vec<u8> {
//!         encode_key(&(self.staff_id.as_str(), self.date.as_str()))
//!     }
//!
//!     fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
//!         let (staff, date): (String, String) = decode_key(bytes)?;
//!         Ok(Self::new(StaffId::new(staff), date))
//!     }
//! }
//! ```

use storekey::{Decode, Encode};

/// Encode a value to bytes using storekey's order-preserving format.
///
/// The encoded bytes sort in the same order as the original values when
/// compared lexicographically. Supported types include primitives, strings,
/// options, tuples (for composite keys) and vecs.
pub fn encode_key<T: Encode>(value: &T) -> Vec<u8> {
    storekey::encode_vec(value).expect("storekey encoding should not fail for valid types")
}

/// Encode a value as a prefix for range scans.
///
/// Identical to `encode_key` but makes the intent clear at call sites. For
/// tuple keys like `(customer_id, timestamp, seq)`, encode just the
/// leading tuple `(customer_id,)` to scan the customer's whole ledger.
pub fn encode_prefix<T: Encode>(value: &T) -> Vec<u8> {
    encode_key(value)
}

/// Decode a value from storekey-encoded bytes.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded to the expected type.
pub fn decode_key<T: Decode>(bytes: &[u8]) -> Result<T, String> {
    storekey::decode(&mut std::io::Cursor::new(bytes))
        .map_err(|e| format!("storekey decode error: {:?}", e))
}

/// Trait for keys that can be serialized for storage in an EntityStore.
///
/// # Ordering Guarantees
///
/// Keys are serialized using `storekey` which preserves lexicographic
/// ordering: strings sort alphabetically, numbers numerically, and tuples
/// element-by-element.
pub trait StorageKey: Clone + Send + Sync + 'static {
    /// Serialize this key to bytes using order-preserving encoding.
    ///
    /// For composite keys, this MUST return the full composite representation
    /// using `encode_key()` with a tuple.
    fn storage_key(&self) -> Vec<u8>;

    /// Deserialize this key from bytes
    fn from_storage_key(bytes: &[u8]) -> Result<Self, String>
    where
        Self: Sized;
}

// --- Standard Implementations ---

impl StorageKey for String {
    fn storage_key(&self) -> Vec<u8> {
        encode_key(&self.as_str())
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        decode_key(bytes)
    }
}

/// `Vec<u8>` keys are treated as already-encoded bytes and pass through
/// unchanged, so callers can hand a pre-built composite key straight to a
/// store.
impl StorageKey for Vec<u8> {
    fn storage_key(&self) -> Vec<u8> {
        self.clone()
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        Ok(bytes.to_vec())
    }
}

impl StorageKey for u32 {
    fn storage_key(&self) -> Vec<u8> {
        encode_key(self)
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        decode_key(bytes)
    }
}

impl StorageKey for u64 {
    fn storage_key(&self) -> Vec<u8> {
        encode_key(self)
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        decode_key(bytes)
    }
}

impl StorageKey for i64 {
    fn storage_key(&self) -> Vec<u8> {
        encode_key(self)
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        decode_key(bytes)
    }
}
