//! Job cards: the workshop's central record.
//!
//! Every mutation appends a `JobAuditEntry`; status only ever moves one step
//! forward along the card's category chain; Delivered is terminal and fires
//! loyalty accrual. Bay occupancy is checked under `assign_lock` so two
//! concurrent assignments cannot both win a technician bay.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ServiceError, ServiceResult};
use crate::services::bays::BayService;
use crate::services::loyalty::LoyaltyService;
use crate::services::parts::PartsService;
use crate::services::staffing::StaffingService;
use motodesk_commons::models::ids::{BayId, CustomerId, JobCardId, PartId, StaffId};
use motodesk_commons::storage_key::{encode_key, encode_prefix};
use motodesk_commons::types::{JobAuditEntry, JobCard, LineItem};
use motodesk_commons::{AuditAction, BayKind, JobStatus, ServiceCategory};
use motodesk_session::AuthSession;
use motodesk_store::{EntityStore, StorageBackend};

pub const JOB_CARDS_PARTITION: &str = "job_cards";
pub const JOB_AUDIT_PARTITION: &str = "job_audit";

#[derive(Clone)]
pub struct JobCardStore {
    backend: Arc<dyn StorageBackend>,
}

impl JobCardStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<JobCardId, JobCard> for JobCardStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        JOB_CARDS_PARTITION
    }
}

/// Audit entries keyed by `(job_card_id, timestamp, seq)` so a prefix scan
/// on the card id returns its trail oldest-first; the monotonic `seq` keeps
/// rows written in the same millisecond in insertion order. Append-only;
/// nothing in the system updates or deletes entries, and they outlive card
/// deletion.
#[derive(Clone)]
pub struct JobAuditStore {
    backend: Arc<dyn StorageBackend>,
}

impl JobAuditStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn entry_key(entry: &JobAuditEntry) -> Vec<u8> {
        encode_key(&(entry.job_card_id.as_str(), entry.timestamp, entry.seq))
    }

    pub fn card_prefix(job_card_id: &JobCardId) -> Vec<u8> {
        encode_prefix(&job_card_id.as_str())
    }
}

impl EntityStore<Vec<u8>, JobAuditEntry> for JobAuditStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        JOB_AUDIT_PARTITION
    }
}

/// New job card at vehicle intake.
#[derive(Debug, Clone)]
pub struct CreateJobCard {
    pub customer_id: CustomerId,
    pub vehicle_registration: String,
    pub vehicle_model: String,
    pub category: ServiceCategory,
    pub description: Option<String>,
    pub odometer_km: Option<u32>,
    pub advance_payment: i64,
}

/// Fields a job card update may change. `None` leaves the field alone.
/// Status, assignment and line items move through their own operations.
#[derive(Debug, Default, Clone)]
pub struct UpdateJobCard {
    pub description: Option<String>,
    pub odometer_km: Option<u32>,
    pub labor_cost: Option<i64>,
    pub advance_payment: Option<i64>,
    pub photo_refs: Option<Vec<String>>,
}

/// Bay and technician assignment. Either side may be set or left alone.
#[derive(Debug, Default, Clone)]
pub struct AssignJob {
    pub bay_id: Option<BayId>,
    pub technician_id: Option<StaffId>,
}

/// Filters for job card listings.
#[derive(Debug, Default, Clone)]
pub struct JobCardFilter {
    pub customer_id: Option<CustomerId>,
    pub status: Option<JobStatus>,
    pub category: Option<ServiceCategory>,
    pub bay_id: Option<BayId>,
    pub technician_id: Option<StaffId>,
    pub limit: usize,
}

pub struct JobCardService {
    cards: JobCardStore,
    audit: JobAuditStore,
    bays: Arc<BayService>,
    parts: Arc<PartsService>,
    loyalty: Arc<LoyaltyService>,
    staffing: Arc<StaffingService>,
    /// Serializes bay occupancy check-then-assign.
    assign_lock: Mutex<()>,
}

impl JobCardService {
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        bays: Arc<BayService>,
        parts: Arc<PartsService>,
        loyalty: Arc<LoyaltyService>,
        staffing: Arc<StaffingService>,
    ) -> Self {
        Self {
            cards: JobCardStore::new(backend.clone()),
            audit: JobAuditStore::new(backend),
            bays,
            parts,
            loyalty,
            staffing,
            assign_lock: Mutex::new(()),
        }
    }

    pub(crate) fn card_store(&self) -> &JobCardStore {
        &self.cards
    }

    fn record(&self, entry: JobAuditEntry) -> ServiceResult<()> {
        self.audit.put(&JobAuditStore::entry_key(&entry), &entry)?;
        Ok(())
    }

    fn audit_entry(&self, card: &JobCardId, actor: &AuthSession, action: AuditAction) -> JobAuditEntry {
        JobAuditEntry::new(
            card.clone(),
            actor.user_id().clone(),
            actor.username(),
            action,
        )
    }

    // --- CRUD ---

    pub fn create(&self, input: CreateJobCard, actor: &AuthSession) -> ServiceResult<JobCard> {
        if input.vehicle_registration.trim().is_empty() {
            return Err(ServiceError::validation(
                "vehicle registration cannot be empty",
            ));
        }
        if input.vehicle_model.trim().is_empty() {
            return Err(ServiceError::validation("vehicle model cannot be empty"));
        }
        if input.advance_payment < 0 {
            return Err(ServiceError::validation("advance payment cannot be negative"));
        }
        // Card creation against a missing customer must 404, not dangle.
        self.loyalty.get_customer(&input.customer_id)?;

        let mut card = JobCard::new(
            input.customer_id,
            input.vehicle_registration.trim(),
            input.vehicle_model.trim(),
            input.category,
        );
        card.description = input.description;
        card.odometer_km = input.odometer_km;
        card.advance_payment = input.advance_payment;
        card.recompute_totals();

        self.cards.put(&card.id, &card)?;
        self.record(self.audit_entry(&card.id, actor, AuditAction::Created))?;

        log::info!(
            "Job card {} opened for {} ({})",
            card.id,
            card.vehicle_registration,
            card.category
        );
        Ok(card)
    }

    pub fn get(&self, id: &JobCardId) -> ServiceResult<JobCard> {
        self.cards
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("job card {}", id)))
    }

    pub fn list(&self, filter: JobCardFilter) -> ServiceResult<Vec<JobCard>> {
        let cards = self
            .cards
            .scan_all()?
            .into_iter()
            .map(|(_, c)| c)
            .filter(|c| {
                filter
                    .customer_id
                    .as_ref()
                    .map_or(true, |want| &c.customer_id == want)
            })
            .filter(|c| filter.status.map_or(true, |want| c.status == want))
            .filter(|c| filter.category.map_or(true, |want| c.category == want))
            .filter(|c| filter.bay_id.as_ref().map_or(true, |want| c.bay_id.as_ref() == Some(want)))
            .filter(|c| {
                filter
                    .technician_id
                    .as_ref()
                    .map_or(true, |want| c.technician_id.as_ref() == Some(want))
            })
            .take(filter.limit)
            .collect();
        Ok(cards)
    }

    pub fn update(
        &self,
        id: &JobCardId,
        changes: UpdateJobCard,
        actor: &AuthSession,
    ) -> ServiceResult<JobCard> {
        let mut card = self.get(id)?;
        let money_touched = changes.labor_cost.is_some() || changes.advance_payment.is_some();
        if card.status.is_terminal() && money_touched {
            return Err(ServiceError::conflict(format!(
                "job card {} is delivered; billing can no longer change",
                id
            )));
        }

        let mut entries = Vec::new();
        if let Some(description) = changes.description {
            entries.push(self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "description",
                card.description.clone(),
                Some(description.clone()),
            ));
            card.description = Some(description);
        }
        if let Some(odometer_km) = changes.odometer_km {
            entries.push(self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "odometer_km",
                card.odometer_km.map(|v| v.to_string()),
                Some(odometer_km.to_string()),
            ));
            card.odometer_km = Some(odometer_km);
        }
        if let Some(labor_cost) = changes.labor_cost {
            if labor_cost < 0 {
                return Err(ServiceError::validation("labor cost cannot be negative"));
            }
            entries.push(self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "labor_cost",
                Some(card.labor_cost.to_string()),
                Some(labor_cost.to_string()),
            ));
            card.labor_cost = labor_cost;
        }
        if let Some(advance_payment) = changes.advance_payment {
            if advance_payment < 0 {
                return Err(ServiceError::validation("advance payment cannot be negative"));
            }
            entries.push(self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "advance_payment",
                Some(card.advance_payment.to_string()),
                Some(advance_payment.to_string()),
            ));
            card.advance_payment = advance_payment;
        }
        if let Some(photo_refs) = changes.photo_refs {
            entries.push(self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "photo_refs",
                Some(card.photo_refs.len().to_string()),
                Some(photo_refs.len().to_string()),
            ));
            card.photo_refs = photo_refs;
        }

        if entries.is_empty() {
            return Ok(card);
        }

        card.recompute_totals();
        card.updated_at = chrono::Utc::now().timestamp_millis();
        self.cards.put(id, &card)?;
        for entry in entries {
            self.record(entry)?;
        }
        Ok(card)
    }

    /// Hard delete of the card. The audit trail stays behind.
    pub fn delete(&self, id: &JobCardId) -> ServiceResult<()> {
        self.get(id)?;
        self.cards.delete(id)?;
        log::info!("Job card {} deleted; audit trail retained", id);
        Ok(())
    }

    // --- Workflow ---

    /// Move a card one step forward along its category's status chain.
    ///
    /// Stamps `delivered_at` and accrues loyalty points on the transition
    /// into Delivered. Reaching Completed or Delivered frees the bay via
    /// the occupancy rule; the assignment ids stay on the card for history.
    pub fn set_status(
        &self,
        id: &JobCardId,
        new_status: JobStatus,
        actor: &AuthSession,
    ) -> ServiceResult<JobCard> {
        let mut card = self.get(id)?;

        if card.status.is_terminal() {
            return Err(ServiceError::conflict(format!(
                "job card {} is delivered and cannot change status",
                id
            )));
        }
        let expected = card.category.next_status(card.status);
        if expected != Some(new_status) {
            return Err(ServiceError::conflict(format!(
                "cannot move a {} job from {} to {}",
                card.category, card.status, new_status
            )));
        }

        let old_status = card.status;
        card.status = new_status;
        card.updated_at = chrono::Utc::now().timestamp_millis();
        if new_status == JobStatus::Delivered {
            card.delivered_at = Some(card.updated_at);
        }
        self.cards.put(id, &card)?;

        self.record(
            self.audit_entry(id, actor, AuditAction::StatusChange).with_change(
                "status",
                Some(old_status.to_string()),
                Some(new_status.to_string()),
            ),
        )?;

        if new_status == JobStatus::Delivered {
            self.loyalty
                .accrue_for_job(&card.customer_id, id, card.cost, actor)?;
        }

        log::info!("Job card {} moved {} -> {}", id, old_status, new_status);
        Ok(card)
    }

    // --- Assignment ---

    /// Assign a bay and/or technician to a card.
    ///
    /// Technician bays take one active job; assigning an occupied one is a
    /// conflict. Wash bays batch freely. Reassignment frees the old bay
    /// implicitly because occupancy is derived from the cards themselves.
    pub fn assign(
        &self,
        id: &JobCardId,
        input: AssignJob,
        actor: &AuthSession,
    ) -> ServiceResult<JobCard> {
        let _guard = self.assign_lock.lock();
        let mut card = self.get(id)?;

        if !card.status.occupies_bay() {
            return Err(ServiceError::conflict(format!(
                "job card {} is {}; finished work cannot be assigned",
                id, card.status
            )));
        }

        let mut entries = Vec::new();

        if let Some(bay_id) = input.bay_id {
            let bay = self.bays.get(&bay_id)?;
            if !bay.active {
                return Err(ServiceError::conflict(format!(
                    "bay '{}' is deactivated",
                    bay.name
                )));
            }
            if bay.kind == BayKind::Technician && self.bay_is_occupied(&bay_id, id)? {
                return Err(ServiceError::conflict(format!(
                    "bay '{}' already has an active job",
                    bay.name
                )));
            }
            entries.push(self.audit_entry(id, actor, AuditAction::Assignment).with_change(
                "bay_id",
                card.bay_id.as_ref().map(|b| b.to_string()),
                Some(bay_id.to_string()),
            ));
            card.bay_id = Some(bay_id);
        }

        if let Some(technician_id) = input.technician_id {
            let staff = self.staffing.get_staff(&technician_id)?;
            if !staff.active {
                return Err(ServiceError::conflict(format!(
                    "staff {} is inactive",
                    staff.name
                )));
            }
            entries.push(self.audit_entry(id, actor, AuditAction::Assignment).with_change(
                "technician_id",
                card.technician_id.as_ref().map(|t| t.to_string()),
                Some(technician_id.to_string()),
            ));
            card.technician_id = Some(technician_id);
        }

        if entries.is_empty() {
            return Err(ServiceError::validation(
                "assignment must name a bay or a technician",
            ));
        }

        card.updated_at = chrono::Utc::now().timestamp_millis();
        self.cards.put(id, &card)?;
        for entry in entries {
            self.record(entry)?;
        }
        Ok(card)
    }

    /// Whether another card actively occupies `bay_id`.
    fn bay_is_occupied(&self, bay_id: &BayId, except: &JobCardId) -> ServiceResult<bool> {
        let occupied = self
            .cards
            .scan_all()?
            .into_iter()
            .any(|(_, c)| c.id != *except && c.bay_id.as_ref() == Some(bay_id) && c.occupies_bay());
        Ok(occupied)
    }

    // --- Line items ---

    /// Charge a part to the card: consume stock and snapshot the part's name
    /// and price onto the line item. Repeated adds of the same part merge
    /// into one line at the original snapshot price.
    pub fn add_line_item(
        &self,
        id: &JobCardId,
        part_id: &PartId,
        quantity: u32,
        actor: &AuthSession,
    ) -> ServiceResult<JobCard> {
        if quantity == 0 {
            return Err(ServiceError::validation("quantity must be at least 1"));
        }
        let mut card = self.get(id)?;
        if card.status.is_terminal() {
            return Err(ServiceError::conflict(format!(
                "job card {} is delivered; billing can no longer change",
                id
            )));
        }

        let part = self.parts.consume_stock(part_id, quantity)?;

        match card.line_items.iter_mut().find(|li| &li.part_id == part_id) {
            Some(line) => line.quantity += quantity,
            None => card.line_items.push(LineItem {
                part_id: part_id.clone(),
                part_name: part.name.clone(),
                unit_price: part.unit_price,
                quantity,
            }),
        }

        let old_cost = card.cost;
        card.recompute_totals();
        card.updated_at = chrono::Utc::now().timestamp_millis();
        self.cards.put(id, &card)?;

        self.record(
            self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "line_items",
                Some(old_cost.to_string()),
                Some(card.cost.to_string()),
            ),
        )?;
        Ok(card)
    }

    /// Remove a part's line item and put its stock back.
    pub fn remove_line_item(
        &self,
        id: &JobCardId,
        part_id: &PartId,
        actor: &AuthSession,
    ) -> ServiceResult<JobCard> {
        let mut card = self.get(id)?;
        if card.status.is_terminal() {
            return Err(ServiceError::conflict(format!(
                "job card {} is delivered; billing can no longer change",
                id
            )));
        }

        let position = card
            .line_items
            .iter()
            .position(|li| &li.part_id == part_id)
            .ok_or_else(|| {
                ServiceError::not_found(format!("part {} is not on job card {}", part_id, id))
            })?;
        let line = card.line_items.remove(position);
        self.parts.restore_stock(part_id, line.quantity)?;

        let old_cost = card.cost;
        card.recompute_totals();
        card.updated_at = chrono::Utc::now().timestamp_millis();
        self.cards.put(id, &card)?;

        self.record(
            self.audit_entry(id, actor, AuditAction::FieldEdit).with_change(
                "line_items",
                Some(old_cost.to_string()),
                Some(card.cost.to_string()),
            ),
        )?;
        Ok(card)
    }

    // --- Audit ---

    /// One card's audit trail, oldest entry first. Works for deleted cards
    /// too, since the trail outlives the card.
    pub fn audit_trail(&self, id: &JobCardId, limit: usize) -> ServiceResult<Vec<JobAuditEntry>> {
        let prefix = JobAuditStore::card_prefix(id);
        let entries = self
            .audit
            .scan_with_prefix_bytes(Some(&prefix), Some(limit))?
            .into_iter()
            .map(|(_, e)| e)
            .collect();
        Ok(entries)
    }

    /// The whole audit log, grouped by card and oldest-first within each.
    pub fn list_audit(&self, limit: usize) -> ServiceResult<Vec<JobAuditEntry>> {
        let entries = self
            .audit
            .scan_limited(limit)?
            .into_iter()
            .map(|(_, e)| e)
            .collect();
        Ok(entries)
    }
}
