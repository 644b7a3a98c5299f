use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow states of a job card.
///
/// The full chain is Pending → InProgress → OilChange → QualityCheck →
/// Completed → Delivered; which steps apply depends on the service category
/// (see `ServiceCategory::status_chain`). Transitions only ever move one step
/// forward along the category's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    OilChange,
    QualityCheck,
    Completed,
    Delivered,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::OilChange => "oil_change",
            JobStatus::QualityCheck => "quality_check",
            JobStatus::Completed => "completed",
            JobStatus::Delivered => "delivered",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(JobStatus::Pending),
            "in_progress" | "inprogress" => Some(JobStatus::InProgress),
            "oil_change" | "oilchange" => Some(JobStatus::OilChange),
            "quality_check" | "qualitycheck" => Some(JobStatus::QualityCheck),
            "completed" => Some(JobStatus::Completed),
            "delivered" => Some(JobStatus::Delivered),
            _ => None,
        }
    }

    /// Delivered is the end of the line; nothing moves past it.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Delivered)
    }

    /// States in which a job still occupies its bay.
    #[inline]
    pub fn occupies_bay(&self) -> bool {
        !matches!(self, JobStatus::Completed | JobStatus::Delivered)
    }
}

impl FromStr for JobStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::from_str_opt(s).ok_or_else(|| format!("Invalid JobStatus: {}", s))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_state() {
        assert!(JobStatus::Delivered.is_terminal());
        assert!(!JobStatus::Completed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
    }

    #[test]
    fn test_bay_occupancy_states() {
        assert!(JobStatus::Pending.occupies_bay());
        assert!(JobStatus::InProgress.occupies_bay());
        assert!(JobStatus::OilChange.occupies_bay());
        assert!(JobStatus::QualityCheck.occupies_bay());
        assert!(!JobStatus::Completed.occupies_bay());
        assert!(!JobStatus::Delivered.occupies_bay());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&JobStatus::QualityCheck).unwrap();
        assert_eq!(json, "\"quality_check\"");
        let back: JobStatus = serde_json::from_str("\"oil_change\"").unwrap();
        assert_eq!(back, JobStatus::OilChange);
    }

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!(JobStatus::from_str_opt("quality_check"), Some(JobStatus::QualityCheck));
        assert_eq!(JobStatus::from_str_opt("InProgress"), Some(JobStatus::InProgress));
        assert_eq!(JobStatus::from_str_opt("done"), None);
    }
}
