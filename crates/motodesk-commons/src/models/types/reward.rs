//! Reward catalog entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::RewardId;

/// An item customers can redeem points for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub description: Option<String>,
    pub points_cost: i64,
    /// Inactive rewards stay visible on old redemptions but cannot be
    /// redeemed anew.
    pub active: bool,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
}

impl Reward {
    /// Create an active reward with a generated id.
    pub fn new(name: impl Into<String>, points_cost: i64) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: RewardId::generate(),
            name: name.into(),
            description: None,
            points_cost,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
