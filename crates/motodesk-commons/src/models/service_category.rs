use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::JobStatus;

/// Category of work a job card is opened for.
///
/// The category fixes which workflow steps a job passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Regular paid service, includes the oil change and quality check steps.
    PaidService,
    /// Free service under the company's service book; no oil change step.
    CompanyFreeService,
    /// Repair work; goes straight from the floor to completion.
    Repair,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::PaidService => "paid_service",
            ServiceCategory::CompanyFreeService => "company_free_service",
            ServiceCategory::Repair => "repair",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid_service" | "paidservice" => Some(ServiceCategory::PaidService),
            "company_free_service" | "companyfreeservice" => Some(ServiceCategory::CompanyFreeService),
            "repair" => Some(ServiceCategory::Repair),
            _ => None,
        }
    }

    /// The ordered workflow chain for this category.
    ///
    /// Every job starts at the first element and may only advance to the next
    /// element of its own chain.
    pub fn status_chain(&self) -> &'static [JobStatus] {
        match self {
            ServiceCategory::PaidService => &[
                JobStatus::Pending,
                JobStatus::InProgress,
                JobStatus::OilChange,
                JobStatus::QualityCheck,
                JobStatus::Completed,
                JobStatus::Delivered,
            ],
            ServiceCategory::CompanyFreeService => &[
                JobStatus::Pending,
                JobStatus::InProgress,
                JobStatus::QualityCheck,
                JobStatus::Completed,
                JobStatus::Delivered,
            ],
            ServiceCategory::Repair => &[
                JobStatus::Pending,
                JobStatus::InProgress,
                JobStatus::Completed,
                JobStatus::Delivered,
            ],
        }
    }

    /// Whether `status` is a legal state for this category at all.
    pub fn allows_status(&self, status: JobStatus) -> bool {
        self.status_chain().contains(&status)
    }

    /// The status that follows `current` in this category's chain, if any.
    pub fn next_status(&self, current: JobStatus) -> Option<JobStatus> {
        let chain = self.status_chain();
        chain
            .iter()
            .position(|s| *s == current)
            .and_then(|idx| chain.get(idx + 1))
            .copied()
    }
}

impl FromStr for ServiceCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCategory::from_str_opt(s).ok_or_else(|| format!("Invalid ServiceCategory: {}", s))
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_service_has_full_chain() {
        let chain = ServiceCategory::PaidService.status_chain();
        assert_eq!(chain.len(), 6);
        assert_eq!(chain[0], JobStatus::Pending);
        assert_eq!(chain[5], JobStatus::Delivered);
        assert!(ServiceCategory::PaidService.allows_status(JobStatus::OilChange));
    }

    #[test]
    fn test_free_service_skips_oil_change() {
        let cat = ServiceCategory::CompanyFreeService;
        assert!(!cat.allows_status(JobStatus::OilChange));
        assert_eq!(cat.next_status(JobStatus::InProgress), Some(JobStatus::QualityCheck));
    }

    #[test]
    fn test_repair_skips_oil_change_and_quality_check() {
        let cat = ServiceCategory::Repair;
        assert!(!cat.allows_status(JobStatus::OilChange));
        assert!(!cat.allows_status(JobStatus::QualityCheck));
        assert_eq!(cat.next_status(JobStatus::InProgress), Some(JobStatus::Completed));
    }

    #[test]
    fn test_next_status_at_end_of_chain() {
        for cat in [
            ServiceCategory::PaidService,
            ServiceCategory::CompanyFreeService,
            ServiceCategory::Repair,
        ] {
            assert_eq!(cat.next_status(JobStatus::Delivered), None);
        }
    }

    #[test]
    fn test_next_status_for_foreign_state() {
        // OilChange is not in the Repair chain, so it has no successor there
        assert_eq!(ServiceCategory::Repair.next_status(JobStatus::OilChange), None);
    }
}
