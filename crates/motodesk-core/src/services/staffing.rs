//! Staff records and daily attendance.
//!
//! Attendance is keyed by `(staff_id, date)` with storekey tuples, so
//! "one record per staff per day" is a key-existence check and a staff
//! member's history is an ordered prefix scan.

use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use motodesk_commons::models::ids::{StaffId, UserId};
use motodesk_commons::storage_key::{encode_key, encode_prefix};
use motodesk_commons::types::{AttendanceRecord, Staff};
use motodesk_session::AuthSession;
use motodesk_store::{EntityStore, StorageBackend};

pub const STAFF_PARTITION: &str = "staff";
pub const ATTENDANCE_PARTITION: &str = "attendance";

#[derive(Clone)]
pub struct StaffStore {
    backend: Arc<dyn StorageBackend>,
}

impl StaffStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<StaffId, Staff> for StaffStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        STAFF_PARTITION
    }
}

#[derive(Clone)]
pub struct AttendanceStore {
    backend: Arc<dyn StorageBackend>,
}

impl AttendanceStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Composite `(staff_id, date)` key for one day's record.
    pub fn day_key(staff_id: &StaffId, date: &str) -> Vec<u8> {
        encode_key(&(staff_id.as_str(), date))
    }
}

impl EntityStore<Vec<u8>, AttendanceRecord> for AttendanceStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        ATTENDANCE_PARTITION
    }
}

/// New staff record.
#[derive(Debug, Clone)]
pub struct CreateStaff {
    pub name: String,
    pub position: String,
    pub phone: Option<String>,
    pub user_id: Option<UserId>,
}

/// Fields a staff update may change. `None` leaves the field alone.
#[derive(Debug, Default, Clone)]
pub struct UpdateStaff {
    pub name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<UserId>,
    pub active: Option<bool>,
}

/// Filters for attendance listings. Dates are ISO `YYYY-MM-DD`, which
/// compare correctly as strings.
#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub staff_id: Option<StaffId>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: usize,
}

pub struct StaffingService {
    staff: StaffStore,
    attendance: AttendanceStore,
}

impl StaffingService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            staff: StaffStore::new(backend.clone()),
            attendance: AttendanceStore::new(backend),
        }
    }

    pub(crate) fn staff_store(&self) -> &StaffStore {
        &self.staff
    }

    pub(crate) fn attendance_store(&self) -> &AttendanceStore {
        &self.attendance
    }

    // --- Staff CRUD ---

    pub fn create_staff(&self, input: CreateStaff) -> ServiceResult<Staff> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::validation("staff name cannot be empty"));
        }
        if input.position.trim().is_empty() {
            return Err(ServiceError::validation("staff position cannot be empty"));
        }
        let mut staff = Staff::new(input.name.trim(), input.position.trim());
        staff.phone = input.phone;
        staff.user_id = input.user_id;
        self.staff.put(&staff.id, &staff)?;
        Ok(staff)
    }

    pub fn get_staff(&self, id: &StaffId) -> ServiceResult<Staff> {
        self.staff
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("staff {}", id)))
    }

    pub fn list_staff(&self, active: Option<bool>, limit: usize) -> ServiceResult<Vec<Staff>> {
        let staff = self
            .staff
            .scan_all()?
            .into_iter()
            .map(|(_, s)| s)
            .filter(|s| active.map_or(true, |want| s.active == want))
            .take(limit)
            .collect();
        Ok(staff)
    }

    pub fn update_staff(&self, id: &StaffId, changes: UpdateStaff) -> ServiceResult<Staff> {
        let mut staff = self.get_staff(id)?;
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("staff name cannot be empty"));
            }
            staff.name = name.trim().to_string();
        }
        if let Some(position) = changes.position {
            staff.position = position;
        }
        if let Some(phone) = changes.phone {
            staff.phone = Some(phone);
        }
        if let Some(user_id) = changes.user_id {
            staff.user_id = Some(user_id);
        }
        if let Some(active) = changes.active {
            staff.active = active;
        }
        staff.updated_at = chrono::Utc::now().timestamp_millis();
        self.staff.put(id, &staff)?;
        Ok(staff)
    }

    pub fn delete_staff(&self, id: &StaffId) -> ServiceResult<()> {
        self.get_staff(id)?;
        self.staff.delete(id)?;
        Ok(())
    }

    // --- Attendance ---

    /// Today's date in the workshop's local time.
    fn today() -> String {
        chrono::Local::now().date_naive().to_string()
    }

    /// Check a staff member in for today. A second check-in on the same
    /// date is a conflict.
    pub fn check_in(&self, staff_id: &StaffId, actor: &AuthSession) -> ServiceResult<AttendanceRecord> {
        self.check_in_on(staff_id, &Self::today(), actor)
    }

    pub(crate) fn check_in_on(
        &self,
        staff_id: &StaffId,
        date: &str,
        actor: &AuthSession,
    ) -> ServiceResult<AttendanceRecord> {
        let staff = self.get_staff(staff_id)?;
        if !staff.active {
            return Err(ServiceError::conflict(format!(
                "staff {} is inactive",
                staff.name
            )));
        }

        let key = AttendanceStore::day_key(staff_id, date);
        if self.attendance.get(&key)?.is_some() {
            return Err(ServiceError::conflict(format!(
                "{} already checked in on {}",
                staff.name, date
            )));
        }

        let record =
            AttendanceRecord::check_in_now(staff_id.clone(), date, actor.user_id().clone());
        self.attendance.put(&key, &record)?;
        Ok(record)
    }

    /// Stamp check-out on today's open record. Missing or already-closed
    /// records are conflicts.
    pub fn check_out(&self, staff_id: &StaffId) -> ServiceResult<AttendanceRecord> {
        self.check_out_on(staff_id, &Self::today())
    }

    pub(crate) fn check_out_on(
        &self,
        staff_id: &StaffId,
        date: &str,
    ) -> ServiceResult<AttendanceRecord> {
        let key = AttendanceStore::day_key(staff_id, date);
        let mut record = self.attendance.get(&key)?.ok_or_else(|| {
            ServiceError::conflict(format!("no check-in recorded for {} on {}", staff_id, date))
        })?;
        if !record.is_open() {
            return Err(ServiceError::conflict(format!(
                "{} already checked out on {}",
                staff_id, date
            )));
        }
        record.check_out_at = Some(chrono::Utc::now().timestamp_millis());
        self.attendance.put(&key, &record)?;
        Ok(record)
    }

    pub fn list_attendance(&self, filter: AttendanceFilter) -> ServiceResult<Vec<AttendanceRecord>> {
        let records = match &filter.staff_id {
            Some(staff_id) => self
                .attendance
                .scan_with_prefix_bytes(Some(&encode_prefix(&staff_id.as_str())), None)?,
            None => self.attendance.scan_all()?,
        };

        let records = records
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| filter.from.as_deref().map_or(true, |from| r.date.as_str() >= from))
            .filter(|r| filter.to.as_deref().map_or(true, |to| r.date.as_str() <= to))
            .take(filter.limit)
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motodesk_commons::models::Role;
    use motodesk_store::InMemoryBackend;

    fn service() -> StaffingService {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::with_partitions(&[
            STAFF_PARTITION,
            ATTENDANCE_PARTITION,
        ]));
        StaffingService::new(backend)
    }

    fn manager() -> AuthSession {
        AuthSession::new(UserId::new("mgr"), "manager", Role::Manager)
    }

    #[test]
    fn test_double_check_in_rejected() {
        let svc = service();
        let staff = svc
            .create_staff(CreateStaff {
                name: "Ravi".to_string(),
                position: "Technician".to_string(),
                phone: None,
                user_id: None,
            })
            .unwrap();

        svc.check_in_on(&staff.id, "2026-08-24", &manager()).unwrap();
        assert!(matches!(
            svc.check_in_on(&staff.id, "2026-08-24", &manager()),
            Err(ServiceError::Conflict(_))
        ));

        // A different day is fine
        svc.check_in_on(&staff.id, "2026-08-25", &manager()).unwrap();
    }

    #[test]
    fn test_check_out_requires_open_record() {
        let svc = service();
        let staff = svc
            .create_staff(CreateStaff {
                name: "Mala".to_string(),
                position: "Wash Staff".to_string(),
                phone: None,
                user_id: None,
            })
            .unwrap();

        // No check-in yet
        assert!(matches!(
            svc.check_out_on(&staff.id, "2026-08-24"),
            Err(ServiceError::Conflict(_))
        ));

        svc.check_in_on(&staff.id, "2026-08-24", &manager()).unwrap();
        let record = svc.check_out_on(&staff.id, "2026-08-24").unwrap();
        assert!(record.check_out_at.is_some());

        // Second check-out
        assert!(matches!(
            svc.check_out_on(&staff.id, "2026-08-24"),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_inactive_staff_cannot_check_in() {
        let svc = service();
        let staff = svc
            .create_staff(CreateStaff {
                name: "Kiran".to_string(),
                position: "Service Advisor".to_string(),
                phone: None,
                user_id: None,
            })
            .unwrap();
        svc.update_staff(
            &staff.id,
            UpdateStaff {
                active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(matches!(
            svc.check_in_on(&staff.id, "2026-08-24", &manager()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_attendance_filter_by_staff_and_range() {
        let svc = service();
        let a = svc
            .create_staff(CreateStaff {
                name: "A".to_string(),
                position: "Technician".to_string(),
                phone: None,
                user_id: None,
            })
            .unwrap();
        let b = svc
            .create_staff(CreateStaff {
                name: "B".to_string(),
                position: "Technician".to_string(),
                phone: None,
                user_id: None,
            })
            .unwrap();

        for date in ["2026-08-20", "2026-08-21", "2026-08-22"] {
            svc.check_in_on(&a.id, date, &manager()).unwrap();
        }
        svc.check_in_on(&b.id, "2026-08-21", &manager()).unwrap();

        let of_a = svc
            .list_attendance(AttendanceFilter {
                staff_id: Some(a.id.clone()),
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(of_a.len(), 3);

        let in_range = svc
            .list_attendance(AttendanceFilter {
                from: Some("2026-08-21".to_string()),
                to: Some("2026-08-21".to_string()),
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(in_range.len(), 2);
    }
}
