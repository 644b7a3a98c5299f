use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of work bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BayKind {
    /// Wash bay: processes vehicles in batches, no single-job limit.
    Wash,
    /// Technician bay: at most one active job at a time.
    Technician,
}

impl BayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BayKind::Wash => "wash",
            BayKind::Technician => "technician",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wash" => Some(BayKind::Wash),
            "technician" => Some(BayKind::Technician),
            _ => None,
        }
    }
}

impl FromStr for BayKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BayKind::from_str_opt(s).ok_or_else(|| format!("Invalid BayKind: {}", s))
    }
}

impl fmt::Display for BayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
