//! Role-based access helpers (RBAC)
//!
//! Centralized authorization rules. One function per capability; handlers
//! call these and map `false` to a 403.

use motodesk_commons::models::{JobStatus, Role};

/// Check if a role can create, update, or delete login users.
#[inline]
pub fn can_manage_users(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Check if a role may see revenue fields (cost, advance, remaining,
/// line-item prices) and the revenue report.
#[inline]
pub fn can_view_financials(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Check if a role can create, edit, and assign job cards.
#[inline]
pub fn can_edit_job_cards(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager | Role::JobCardClerk)
}

/// Check if a role can delete job cards.
#[inline]
pub fn can_delete_job_cards(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Check if a role can move a job card to any status legal for its
/// category.
#[inline]
pub fn can_set_any_job_status(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager | Role::JobCardClerk)
}

/// Check if a role can move a job card to the given status.
///
/// Floor roles (Technician, ServiceStaff) may only mark work started or
/// finished; every other target status needs a clerk role or above, even
/// when the transition itself would be legal.
#[inline]
pub fn can_set_job_status(role: Role, new_status: JobStatus) -> bool {
    if can_set_any_job_status(role) {
        return true;
    }
    matches!(role, Role::Technician | Role::ServiceStaff)
        && matches!(new_status, JobStatus::InProgress | JobStatus::Completed)
}

/// Check if a role can manage the workshop catalog: bays, staff, parts,
/// and rewards.
#[inline]
pub fn can_manage_catalog(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Check if a role can record staff attendance (check-in/check-out).
#[inline]
pub fn can_record_attendance(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager | Role::ServiceStaff)
}

/// Check if a role can register customers.
#[inline]
pub fn can_create_customers(role: Role) -> bool {
    matches!(
        role,
        Role::Admin | Role::Manager | Role::JobCardClerk | Role::ServiceStaff
    )
}

/// Check if a role can open a reward redemption for a customer.
#[inline]
pub fn can_create_redemptions(role: Role) -> bool {
    can_create_customers(role)
}

/// Check if a role can resolve a redemption (fulfill or cancel).
#[inline]
pub fn can_resolve_redemptions(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager | Role::ServiceStaff)
}

/// Check if a role can apply manual loyalty point adjustments.
#[inline]
pub fn can_adjust_points(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Check if a role can read job card audit trails.
#[inline]
pub fn can_view_audit(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Check if a role can read the reporting endpoints.
#[inline]
pub fn can_view_reports(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Check if a role has admin privileges.
#[inline]
pub fn is_admin_role(role: Role) -> bool {
    matches!(role, Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_manages_users() {
        assert!(can_manage_users(Role::Admin));
        assert!(!can_manage_users(Role::Manager));
        assert!(!can_manage_users(Role::JobCardClerk));
        assert!(!can_manage_users(Role::Technician));
        assert!(!can_manage_users(Role::ServiceStaff));
    }

    #[test]
    fn test_financials_are_management_only() {
        assert!(can_view_financials(Role::Admin));
        assert!(can_view_financials(Role::Manager));
        assert!(!can_view_financials(Role::JobCardClerk));
        assert!(!can_view_financials(Role::Technician));
        assert!(!can_view_financials(Role::ServiceStaff));
    }

    #[test]
    fn test_floor_roles_limited_to_progress_statuses() {
        for role in [Role::Technician, Role::ServiceStaff] {
            assert!(can_set_job_status(role, JobStatus::InProgress));
            assert!(can_set_job_status(role, JobStatus::Completed));
            assert!(!can_set_job_status(role, JobStatus::OilChange));
            assert!(!can_set_job_status(role, JobStatus::QualityCheck));
            assert!(!can_set_job_status(role, JobStatus::Delivered));
        }
    }

    #[test]
    fn test_clerk_sets_any_status() {
        assert!(can_set_job_status(Role::JobCardClerk, JobStatus::Delivered));
        assert!(can_set_job_status(Role::JobCardClerk, JobStatus::OilChange));
        assert!(!can_delete_job_cards(Role::JobCardClerk));
    }

    #[test]
    fn test_attendance_and_redemptions() {
        assert!(can_record_attendance(Role::ServiceStaff));
        assert!(!can_record_attendance(Role::Technician));
        assert!(!can_record_attendance(Role::JobCardClerk));

        assert!(can_create_redemptions(Role::JobCardClerk));
        assert!(!can_resolve_redemptions(Role::JobCardClerk));
        assert!(can_resolve_redemptions(Role::ServiceStaff));
    }
}
