//! # motodesk-commons
//!
//! Shared types, identifiers and errors for MotoDesk.
//!
//! This crate provides the foundational types used across all MotoDesk crates
//! (motodesk-core, motodesk-store, motodesk-auth, motodesk-api). It stays
//! dependency-light to prevent circular dependency issues.
//!
//! ## Type-Safe Wrappers
//!
//! Identifiers are newtype wrappers so a customer id can never be passed where
//! a job card id is expected:
//! - `UserId`: login account identifier
//! - `JobCardId`: job card identifier
//! - `CustomerId`, `BayId`, `StaffId`, `PartId`, `RewardId`, `RedemptionId`
//!
//! ## Domain Models
//!
//! The `types` module contains the single source of truth for all persisted
//! models: `User`, `JobCard`, `Bay`, `Staff`, `AttendanceRecord`, `Customer`,
//! `Reward`, `Redemption`, `PointsEntry`, `Part` and `JobAuditEntry`.
//! Do not create duplicate model definitions elsewhere in the codebase.
//!
//! ## Example Usage
//!
//! ```rust
//! use motodesk_commons::models::{CustomerId, JobCardId};
//! use motodesk_commons::types::JobStatus;
//!
//! let customer_id = CustomerId::generate();
//! let job_id = JobCardId::generate();
//! assert!(!JobStatus::Pending.is_terminal());
//! assert_eq!(customer_id.as_str().len(), 21);
//! let _ = job_id.into_string();
//! ```

pub mod errors;
pub mod models;
pub mod storage_key;

// Re-export commonly used types at crate root
pub use errors::{CommonError, Result};
pub use models::{
    types, AuditAction, BayId, BayKind, CustomerId, JobCardId, JobStatus, LoyaltyTier, PartId,
    PointsEntryKind, RedemptionId, RedemptionStatus, RewardId, Role, ServiceCategory, StaffId,
    UserId,
};
pub use storage_key::{decode_key, encode_key, encode_prefix, StorageKey};
