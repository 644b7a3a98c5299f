//! Workshop staff entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::{StaffId, UserId};

/// Workshop staff entity.
///
/// Technicians, wash staff, advisors. Separate from `User`: a staff member
/// may work without a login (attendance is still tracked), and a login may
/// belong to office staff who never appear on the floor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Staff {
    pub id: StaffId,
    /// Login account linked to this staff member, if they have one.
    pub user_id: Option<UserId>,
    pub name: String,
    pub phone: Option<String>,
    /// Free-form job title ("Technician", "Service Advisor", "Wash Staff").
    pub position: String,
    pub active: bool,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
}

impl Staff {
    /// Create an active staff member with a generated id.
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: StaffId::generate(),
            user_id: None,
            name: name.into(),
            phone: None,
            position: position.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
