//! Job card entity and its part line items.

use serde::{Deserialize, Serialize};

use crate::models::ids::{BayId, CustomerId, JobCardId, PartId, StaffId};
use crate::models::{JobStatus, ServiceCategory};

/// A part charged to a job card.
///
/// `part_name` and `unit_price` are snapshots taken when the line item is
/// added; later catalog edits do not rewrite history on existing job cards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LineItem {
    pub part_id: PartId,
    pub part_name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

impl LineItem {
    /// Total for this line (unit price times quantity).
    #[inline]
    pub fn total(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// Job card entity.
///
/// The central record of the workshop: one vehicle visit from intake to
/// delivery. Status moves along the chain fixed by `category`
/// (see `ServiceCategory::status_chain`); every mutation writes a
/// `JobAuditEntry` alongside.
///
/// ## Fields
/// - `cost`: Total charge, parts plus labor
/// - `advance_payment`: Collected at intake
/// - `remaining_payment`: `cost - advance_payment`, floored at zero
/// - `bay_id` / `technician_id`: Current assignment, if any
/// - `delivered_at`: Stamped exactly once, when status reaches Delivered
///
/// Revenue fields (`cost`, `advance_payment`, `remaining_payment`, line item
/// prices) are redacted for non-management roles at the API layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JobCard {
    pub id: JobCardId,
    pub customer_id: CustomerId,
    pub vehicle_registration: String,
    pub vehicle_model: String,
    pub odometer_km: Option<u32>,
    pub category: ServiceCategory,
    pub status: JobStatus,
    pub description: Option<String>,
    pub bay_id: Option<BayId>,
    pub technician_id: Option<StaffId>,
    pub line_items: Vec<LineItem>,
    pub photo_refs: Vec<String>,
    pub labor_cost: i64,
    pub cost: i64,
    pub advance_payment: i64,
    pub remaining_payment: i64,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
    pub delivered_at: Option<i64>,
}

impl JobCard {
    /// Create a new Pending job card with a generated id.
    pub fn new(
        customer_id: CustomerId,
        vehicle_registration: impl Into<String>,
        vehicle_model: impl Into<String>,
        category: ServiceCategory,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: JobCardId::generate(),
            customer_id,
            vehicle_registration: vehicle_registration.into(),
            vehicle_model: vehicle_model.into(),
            odometer_km: None,
            category,
            status: JobStatus::Pending,
            description: None,
            bay_id: None,
            technician_id: None,
            line_items: Vec::new(),
            photo_refs: Vec::new(),
            labor_cost: 0,
            cost: 0,
            advance_payment: 0,
            remaining_payment: 0,
            created_at: now,
            updated_at: now,
            delivered_at: None,
        }
    }

    /// Recompute `cost` and `remaining_payment` from line items, labor and
    /// the advance. Called after any edit that touches money.
    pub fn recompute_totals(&mut self) {
        let parts: i64 = self.line_items.iter().map(LineItem::total).sum();
        self.cost = parts + self.labor_cost;
        self.remaining_payment = (self.cost - self.advance_payment).max(0);
    }

    /// Whether this job currently holds its bay slot.
    #[inline]
    pub fn occupies_bay(&self) -> bool {
        self.bay_id.is_some() && self.status.occupies_bay()
    }
}
