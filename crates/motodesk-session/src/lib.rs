//! # motodesk-session
//!
//! Session context and role-based authorization helpers for MotoDesk.
//!
//! This crate provides:
//! - [`AuthSession`]: the authenticated identity the bearer middleware
//!   injects into request extensions, carried through handlers into audit
//!   entries
//! - [`rbac`]: centralized capability checks; handlers gate through these,
//!   never through ad-hoc role matches
//!
//! Authorization fails closed: anything not explicitly granted to a role
//! is denied.

pub mod auth_session;
pub mod rbac;

pub use auth_session::AuthSession;
pub use rbac::{
    can_adjust_points, can_create_customers, can_create_redemptions, can_delete_job_cards,
    can_edit_job_cards, can_manage_catalog, can_manage_users, can_record_attendance,
    can_resolve_redemptions, can_set_any_job_status, can_set_job_status, can_view_audit,
    can_view_financials, can_view_reports, is_admin_role,
};
