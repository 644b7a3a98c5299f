use std::fmt;

use serde::{Deserialize, Serialize};

/// What a job card audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Job card opened.
    Created,
    /// Workflow status moved forward.
    StatusChange,
    /// Bay or technician assignment changed.
    Assignment,
    /// Any other field edited (cost, description, line items, ...).
    FieldEdit,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::StatusChange => "status_change",
            AuditAction::Assignment => "assignment",
            AuditAction::FieldEdit => "field_edit",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
