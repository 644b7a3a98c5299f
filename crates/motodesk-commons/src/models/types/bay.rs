//! Work bay entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::BayId;
use crate::models::BayKind;

/// Work bay entity.
///
/// Technician bays take one active job at a time; wash bays batch vehicles
/// and have no single-job limit. An inactive bay cannot take new assignments
/// but keeps whatever is already in it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Bay {
    pub id: BayId,
    pub name: String,
    pub kind: BayKind,
    pub active: bool,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
}

impl Bay {
    /// Create an active bay with a generated id.
    pub fn new(name: impl Into<String>, kind: BayKind) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: BayId::generate(),
            name: name.into(),
            kind,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
