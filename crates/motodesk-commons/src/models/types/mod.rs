//! Persisted models for MotoDesk.
//!
//! This module is the single source of truth for everything the store
//! persists. Do not create duplicate model definitions elsewhere in the
//! codebase; import from `motodesk_commons::types::*` or via the re-exports
//! at the crate root.
//!
//! All models serialize with Serde JSON, both in the store and on the API
//! (API responses go through DTOs in motodesk-api, which is where the
//! role-based redaction of revenue fields happens).
//!
//! Timestamps are Unix milliseconds (`i64`); money amounts are whole
//! currency units (`i64`).

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence for append-only entries (audit trail, points
/// ledger). Millisecond timestamps alone tie when one request writes
/// several rows back to back; the sequence keeps their composite keys in
/// insertion order.
static ENTRY_SEQ: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_entry_seq() -> u64 {
    ENTRY_SEQ.fetch_add(1, Ordering::Relaxed)
}

mod attendance;
mod bay;
mod customer;
mod job_audit_entry;
mod job_card;
mod part;
mod points_entry;
mod redemption;
mod reward;
mod staff;
mod user;

pub use attendance::AttendanceRecord;
pub use bay::Bay;
pub use customer::Customer;
pub use job_audit_entry::JobAuditEntry;
pub use job_card::{JobCard, LineItem};
pub use part::Part;
pub use points_entry::PointsEntry;
pub use redemption::Redemption;
pub use reward::Reward;
pub use staff::Staff;
pub use user::{User, DEFAULT_LOCKOUT_DURATION_MINUTES, DEFAULT_MAX_FAILED_ATTEMPTS};

// Re-export the enums models use, so `types::*` is self-sufficient in handlers
pub use crate::models::{
    AuditAction, BayKind, JobStatus, LoyaltyTier, PointsEntryKind, RedemptionStatus, Role,
    ServiceCategory,
};
