//! Customer entity with loyalty balances.

use serde::{Deserialize, Serialize};

use crate::models::ids::CustomerId;
use crate::models::LoyaltyTier;

/// Customer entity.
///
/// Loyalty state is two balances:
/// - `lifetime_points` only ever grows (earns and positive adjustments);
///   the tier is derived from it and never stored
/// - `available_points` is spendable and never goes below zero
///
/// Every balance change also appends a `PointsEntry` to the customer's
/// ledger; the balances are the fold of the ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub available_points: i64,
    pub lifetime_points: i64,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
}

impl Customer {
    /// Create a new customer with zero balances.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: CustomerId::generate(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            available_points: 0,
            lifetime_points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current tier, derived from lifetime points.
    #[inline]
    pub fn tier(&self) -> LoyaltyTier {
        LoyaltyTier::for_lifetime_points(self.lifetime_points)
    }
}
