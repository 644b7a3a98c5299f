use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Application roles for MotoDesk logins.
///
/// Capability checks live in `motodesk-session::rbac`; this type only
/// identifies the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user administration.
    Admin,
    /// Operations lead: everything except user administration.
    Manager,
    /// Front desk: opens and edits job cards, no revenue visibility.
    JobCardClerk,
    /// Workshop technician: limited status updates on assigned work.
    Technician,
    /// Wash / general service staff: limited status updates, attendance,
    /// customer-facing loyalty actions.
    ServiceStaff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::JobCardClerk => "job_card_clerk",
            Role::Technician => "technician",
            Role::ServiceStaff => "service_staff",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "job_card_clerk" | "jobcardclerk" | "clerk" => Some(Role::JobCardClerk),
            "technician" => Some(Role::Technician),
            "service_staff" | "servicestaff" => Some(Role::ServiceStaff),
            _ => None,
        }
    }

    /// All roles, in privilege order. Used by validation and tests.
    pub fn all() -> [Role; 5] {
        [
            Role::Admin,
            Role::Manager,
            Role::JobCardClerk,
            Role::Technician,
            Role::ServiceStaff,
        ]
    }
}

impl FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_str_opt(s).ok_or_else(|| format!("Invalid Role: {}", s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_roles() {
        for role in Role::all() {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::from_str_opt("Admin"), Some(Role::Admin));
        assert_eq!(Role::from_str_opt("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::from_str_opt("JobCardClerk"), Some(Role::JobCardClerk));
        assert_eq!(Role::from_str_opt("intern"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::JobCardClerk).unwrap();
        assert_eq!(json, "\"job_card_clerk\"");
        let back: Role = serde_json::from_str("\"service_staff\"").unwrap();
        assert_eq!(back, Role::ServiceStaff);
    }
}
