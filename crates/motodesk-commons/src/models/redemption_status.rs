use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a reward redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    /// Points are held; the reward has not been handed over yet.
    Pending,
    /// Reward handed over; the points stay spent.
    Fulfilled,
    /// Redemption abandoned; the points were refunded.
    Cancelled,
}

impl RedemptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionStatus::Pending => "pending",
            RedemptionStatus::Fulfilled => "fulfilled",
            RedemptionStatus::Cancelled => "cancelled",
        }
    }

    /// Fulfilled and Cancelled are final.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, RedemptionStatus::Pending)
    }
}

impl fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
