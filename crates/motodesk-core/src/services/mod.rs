//! Domain services.
//!
//! Each service owns its entity stores and enforces the invariants of its
//! slice of the domain; `JobCardService` composes the others where jobs
//! touch bays, parts and loyalty.

pub mod bays;
pub mod job_cards;
pub mod loyalty;
pub mod parts;
pub mod reports;
pub mod staffing;

pub use bays::{BayService, UpdateBay};
pub use job_cards::{
    AssignJob, CreateJobCard, JobCardFilter, JobCardService, UpdateJobCard,
};
pub use loyalty::{
    CreateCustomer, CreateReward, LoyaltyService, RedemptionFilter, UpdateCustomer, UpdateReward,
};
pub use parts::{CreatePart, PartFilter, PartsService, UpdatePart};
pub use reports::{
    AttendanceReport, JobsReport, LoyaltyReport, ReportRange, ReportsService, RevenueReport,
};
pub use staffing::{AttendanceFilter, CreateStaff, StaffingService, UpdateStaff};
