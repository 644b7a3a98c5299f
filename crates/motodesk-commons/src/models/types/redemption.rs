//! Reward redemption entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::{CustomerId, RedemptionId, RewardId, UserId};
use crate::models::RedemptionStatus;

/// A customer's redemption of a reward.
///
/// Created Pending with the points already deducted from the customer's
/// available balance. Resolving it either keeps the points spent (Fulfilled)
/// or refunds them (Cancelled). `reward_name` and `points_spent` are
/// snapshots; later reward edits do not change past redemptions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Redemption {
    pub id: RedemptionId,
    pub customer_id: CustomerId,
    pub reward_id: RewardId,
    pub reward_name: String,
    pub points_spent: i64,
    pub status: RedemptionStatus,
    pub requested_by: UserId,
    pub resolved_by: Option<UserId>,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub resolved_at: Option<i64>,
}

impl Redemption {
    /// Create a Pending redemption with a generated id.
    pub fn new(
        customer_id: CustomerId,
        reward_id: RewardId,
        reward_name: impl Into<String>,
        points_spent: i64,
        requested_by: UserId,
    ) -> Self {
        Self {
            id: RedemptionId::generate(),
            customer_id,
            reward_id,
            reward_name: reward_name.into(),
            points_spent,
            status: RedemptionStatus::Pending,
            requested_by,
            resolved_by: None,
            created_at: chrono::Utc::now().timestamp_millis(),
            resolved_at: None,
        }
    }
}
