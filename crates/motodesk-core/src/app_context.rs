//! Shared application context.
//!
//! Owns every domain service over one storage backend. Built once at
//! startup and handed to the HTTP layer as shared state.

use std::sync::Arc;

use crate::error::ServiceResult;
use crate::services::bays::{BayService, BAYS_PARTITION};
use crate::services::job_cards::{JobCardService, JOB_AUDIT_PARTITION, JOB_CARDS_PARTITION};
use crate::services::loyalty::{
    LoyaltyService, CUSTOMERS_PARTITION, POINTS_LEDGER_PARTITION, REDEMPTIONS_PARTITION,
    REWARDS_PARTITION,
};
use crate::services::parts::{PartsService, PARTS_PARTITION};
use crate::services::reports::ReportsService;
use crate::services::staffing::{StaffingService, ATTENDANCE_PARTITION, STAFF_PARTITION};
use motodesk_configs::LoyaltySettings;
use motodesk_store::StorageBackend;

/// Partitions the domain services expect, users partition included since
/// the auth layer shares the same backend.
pub const ALL_PARTITIONS: &[&str] = &[
    "users",
    JOB_CARDS_PARTITION,
    JOB_AUDIT_PARTITION,
    BAYS_PARTITION,
    STAFF_PARTITION,
    ATTENDANCE_PARTITION,
    CUSTOMERS_PARTITION,
    REWARDS_PARTITION,
    REDEMPTIONS_PARTITION,
    POINTS_LEDGER_PARTITION,
    PARTS_PARTITION,
];

/// Every domain service, wired over one backend.
pub struct AppContext {
    pub backend: Arc<dyn StorageBackend>,
    pub bays: Arc<BayService>,
    pub parts: Arc<PartsService>,
    pub loyalty: Arc<LoyaltyService>,
    pub staffing: Arc<StaffingService>,
    pub job_cards: Arc<JobCardService>,
    pub reports: Arc<ReportsService>,
}

impl AppContext {
    /// Wire the services in dependency order. The backend must already
    /// have the partitions in `ALL_PARTITIONS`.
    pub fn new(backend: Arc<dyn StorageBackend>, loyalty_settings: LoyaltySettings) -> ServiceResult<Self> {
        let bays = Arc::new(BayService::new(backend.clone()));
        let parts = Arc::new(PartsService::new(backend.clone()));
        let loyalty = Arc::new(LoyaltyService::new(backend.clone(), loyalty_settings));
        let staffing = Arc::new(StaffingService::new(backend.clone()));
        let job_cards = Arc::new(JobCardService::new(
            backend.clone(),
            bays.clone(),
            parts.clone(),
            loyalty.clone(),
            staffing.clone(),
        ));
        let reports = Arc::new(ReportsService::new(backend.clone()));

        Ok(Self {
            backend,
            bays,
            parts,
            loyalty,
            staffing,
            job_cards,
            reports,
        })
    }
}
