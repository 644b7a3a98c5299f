//! Daily attendance record.

use serde::{Deserialize, Serialize};

use crate::models::ids::{StaffId, UserId};

/// One staff member's attendance for one day.
///
/// Keyed by `(staff_id, date)` in the store, which is what makes "at most one
/// record per staff per day" hold: a second check-in on the same date finds
/// the existing key and is rejected.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttendanceRecord {
    pub staff_id: StaffId,
    /// Calendar date in `YYYY-MM-DD` form, in the workshop's local time.
    pub date: String,
    pub check_in_at: i64, // Unix timestamp in milliseconds
    pub check_out_at: Option<i64>,
    /// Who recorded the check-in (staff can be checked in by a manager).
    pub recorded_by: UserId,
}

impl AttendanceRecord {
    /// Open a new record: checked in now, not yet checked out.
    pub fn check_in_now(staff_id: StaffId, date: impl Into<String>, recorded_by: UserId) -> Self {
        Self {
            staff_id,
            date: date.into(),
            check_in_at: chrono::Utc::now().timestamp_millis(),
            check_out_at: None,
            recorded_by,
        }
    }

    /// A record is open until check-out is stamped.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.check_out_at.is_none()
    }

    /// Milliseconds between check-in and check-out, if checked out.
    #[inline]
    pub fn worked_millis(&self) -> Option<i64> {
        self.check_out_at.map(|out| (out - self.check_in_at).max(0))
    }
}
