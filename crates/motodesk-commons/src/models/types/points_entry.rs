//! Loyalty points ledger entry.

use serde::{Deserialize, Serialize};

use crate::models::ids::{CustomerId, JobCardId, RedemptionId, UserId};
use crate::models::PointsEntryKind;

/// One movement in a customer's points ledger.
///
/// Append-only. `points` is the signed delta applied to the available
/// balance and `balance_after` is the available balance once applied, so the
/// ledger can be audited without replaying it. Keyed by
/// `(customer_id, created_at, seq)` in the store; a prefix scan returns a
/// customer's history oldest-first, insertion order preserved within a
/// millisecond.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointsEntry {
    pub id: String, // NanoID
    /// Monotonic tie-break for entries stamped in the same millisecond.
    pub seq: u64,
    pub customer_id: CustomerId,
    pub kind: PointsEntryKind,
    pub points: i64,
    /// Delivered job that earned the points, for `Earn` entries.
    pub job_card_id: Option<JobCardId>,
    /// Redemption that spent or refunded the points.
    pub redemption_id: Option<RedemptionId>,
    pub reason: Option<String>,
    pub balance_after: i64,
    pub actor_id: UserId,
    pub created_at: i64, // Unix timestamp in milliseconds
}

impl PointsEntry {
    /// Create an entry stamped with the current time and a fresh id.
    pub fn new(
        customer_id: CustomerId,
        kind: PointsEntryKind,
        points: i64,
        balance_after: i64,
        actor_id: UserId,
    ) -> Self {
        Self {
            id: nanoid::nanoid!(),
            seq: super::next_entry_seq(),
            customer_id,
            kind,
            points,
            job_card_id: None,
            redemption_id: None,
            reason: None,
            balance_after,
            actor_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Link the delivered job that earned these points.
    pub fn for_job_card(mut self, job_card_id: JobCardId) -> Self {
        self.job_card_id = Some(job_card_id);
        self
    }

    /// Link the redemption that spent or refunded these points.
    pub fn for_redemption(mut self, redemption_id: RedemptionId) -> Self {
        self.redemption_id = Some(redemption_id);
        self
    }

    /// Attach a free-text reason, used for manual adjustments.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earn_entry_links_job_card() {
        let entry = PointsEntry::new(
            CustomerId::new("cust_1"),
            PointsEntryKind::Earn,
            120,
            120,
            UserId::new("clerk"),
        )
        .for_job_card(JobCardId::new("job_1"));

        assert_eq!(entry.points, 120);
        assert_eq!(entry.job_card_id, Some(JobCardId::new("job_1")));
        assert!(entry.redemption_id.is_none());
    }

    #[test]
    fn test_adjust_entry_keeps_reason() {
        let entry = PointsEntry::new(
            CustomerId::new("cust_1"),
            PointsEntryKind::Adjust,
            -50,
            70,
            UserId::new("admin"),
        )
        .with_reason("Goodwill correction");

        assert_eq!(entry.points, -50);
        assert_eq!(entry.reason.as_deref(), Some("Goodwill correction"));
    }
}
