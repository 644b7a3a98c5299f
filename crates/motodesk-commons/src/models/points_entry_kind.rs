use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a points ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsEntryKind {
    /// Points earned from a delivered job. Raises available and lifetime.
    Earn,
    /// Points spent on a redemption. Lowers available only.
    Redeem,
    /// Points returned by a cancelled redemption. Raises available only.
    Refund,
    /// Manual correction by an administrator. Positive adjustments raise
    /// lifetime as well; negative ones touch available only.
    Adjust,
}

impl PointsEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointsEntryKind::Earn => "earn",
            PointsEntryKind::Redeem => "redeem",
            PointsEntryKind::Refund => "refund",
            PointsEntryKind::Adjust => "adjust",
        }
    }
}

impl fmt::Display for PointsEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
