//! Type-safe wrapper types for MotoDesk identifiers and enums.
//!
//! Newtype wrappers around String enforce type safety at compile time,
//! preventing accidental mixing of customer IDs, job card IDs and bay IDs.
//!
//! The `types` submodule contains the single source of truth for all
//! persisted models. Import from `motodesk_commons::types::*` to use them.
//!
//! ## Examples
//!
//! ```rust
//! use motodesk_commons::models::{CustomerId, JobCardId, Role};
//!
//! let customer_id = CustomerId::new("cust_123");
//! let job_id = JobCardId::generate();
//!
//! // Type safety prevents mixing
//! // let wrong: JobCardId = customer_id; // Compile error!
//!
//! assert!(Role::Manager.as_str() == "manager");
//! let _ = (customer_id.as_str(), job_id.into_string());
//! ```

pub mod ids; // Type-safe identifier wrappers
pub mod types; // Persisted models (User, JobCard, Customer, etc.)

// Standalone enum modules
mod audit_action;
mod bay_kind;
mod job_status;
mod loyalty_tier;
mod points_entry_kind;
mod redemption_status;
mod role;
mod service_category;

// Re-export all types from submodules for convenience
pub use audit_action::AuditAction;
pub use bay_kind::BayKind;
pub use ids::*;
pub use job_status::JobStatus;
pub use loyalty_tier::LoyaltyTier;
pub use points_entry_kind::PointsEntryKind;
pub use redemption_status::RedemptionStatus;
pub use role::Role;
pub use service_category::ServiceCategory;
