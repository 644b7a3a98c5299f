//! Audit entry for job card changes.

use serde::{Deserialize, Serialize};

use crate::models::ids::{JobCardId, UserId};
use crate::models::AuditAction;

/// Audit entry for a job card change.
///
/// Captures who changed what and the old and new values. Entries are
/// append-only; nothing in the system updates or deletes them. Keyed by
/// `(job_card_id, timestamp, seq)` so a prefix scan returns one card's
/// trail oldest-first, insertion order preserved within a millisecond.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JobAuditEntry {
    pub id: String, // NanoID
    /// Monotonic tie-break for entries stamped in the same millisecond.
    pub seq: u64,
    pub job_card_id: JobCardId,
    pub timestamp: i64,
    pub actor_user_id: UserId,
    pub actor_username: String,
    pub action: AuditAction,
    /// Which field changed, for `FieldEdit` and `Assignment` entries.
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl JobAuditEntry {
    /// Create an entry stamped with the current time and a fresh id.
    pub fn new(
        job_card_id: JobCardId,
        actor_user_id: UserId,
        actor_username: impl Into<String>,
        action: AuditAction,
    ) -> Self {
        Self {
            id: nanoid::nanoid!(),
            seq: super::next_entry_seq(),
            job_card_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            actor_user_id,
            actor_username: actor_username.into(),
            action,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Attach the changed field and its before/after values.
    pub fn with_change(
        mut self,
        field: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        self.field = Some(field.into());
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }
}
