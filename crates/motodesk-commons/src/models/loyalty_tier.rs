use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Loyalty tier of a customer, derived from lifetime points.
///
/// Tiers are never stored; they are computed from `lifetime_points` at the
/// fixed thresholds below. The earn multiplier is likewise fixed per tier.
/// Only the points-per-currency-unit rate is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Lifetime points needed for Silver.
pub const SILVER_THRESHOLD: i64 = 1_000;
/// Lifetime points needed for Gold.
pub const GOLD_THRESHOLD: i64 = 5_000;
/// Lifetime points needed for Platinum.
pub const PLATINUM_THRESHOLD: i64 = 10_000;

impl LoyaltyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "bronze",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
            LoyaltyTier::Platinum => "platinum",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bronze" => Some(LoyaltyTier::Bronze),
            "silver" => Some(LoyaltyTier::Silver),
            "gold" => Some(LoyaltyTier::Gold),
            "platinum" => Some(LoyaltyTier::Platinum),
            _ => None,
        }
    }

    /// The tier a customer with `lifetime_points` sits in.
    pub fn for_lifetime_points(lifetime_points: i64) -> Self {
        if lifetime_points >= PLATINUM_THRESHOLD {
            LoyaltyTier::Platinum
        } else if lifetime_points >= GOLD_THRESHOLD {
            LoyaltyTier::Gold
        } else if lifetime_points >= SILVER_THRESHOLD {
            LoyaltyTier::Silver
        } else {
            LoyaltyTier::Bronze
        }
    }

    /// Earn multiplier applied to accruals for customers in this tier.
    pub fn multiplier(&self) -> f64 {
        match self {
            LoyaltyTier::Bronze => 1.0,
            LoyaltyTier::Silver => 1.25,
            LoyaltyTier::Gold => 1.5,
            LoyaltyTier::Platinum => 2.0,
        }
    }

    /// Tiers from lowest to highest.
    pub fn all() -> [LoyaltyTier; 4] {
        [
            LoyaltyTier::Bronze,
            LoyaltyTier::Silver,
            LoyaltyTier::Gold,
            LoyaltyTier::Platinum,
        ]
    }
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        LoyaltyTier::Bronze
    }
}

impl FromStr for LoyaltyTier {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoyaltyTier::from_str_opt(s).ok_or_else(|| format!("Invalid LoyaltyTier: {}", s))
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(LoyaltyTier::Bronze < LoyaltyTier::Silver);
        assert!(LoyaltyTier::Silver < LoyaltyTier::Gold);
        assert!(LoyaltyTier::Gold < LoyaltyTier::Platinum);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LoyaltyTier::for_lifetime_points(0), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::for_lifetime_points(999), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::for_lifetime_points(1_000), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::for_lifetime_points(4_999), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::for_lifetime_points(5_000), LoyaltyTier::Gold);
        assert_eq!(LoyaltyTier::for_lifetime_points(9_999), LoyaltyTier::Gold);
        assert_eq!(LoyaltyTier::for_lifetime_points(10_000), LoyaltyTier::Platinum);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(LoyaltyTier::Bronze.multiplier(), 1.0);
        assert_eq!(LoyaltyTier::Silver.multiplier(), 1.25);
        assert_eq!(LoyaltyTier::Gold.multiplier(), 1.5);
        assert_eq!(LoyaltyTier::Platinum.multiplier(), 2.0);
    }

    #[test]
    fn test_default_is_bronze() {
        assert_eq!(LoyaltyTier::default(), LoyaltyTier::Bronze);
    }
}
