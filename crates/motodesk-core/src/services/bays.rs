//! Work bay registry.
//!
//! Occupancy rules live in the job-card service, which owns the jobs that
//! occupy bays; this service is the bay catalog itself.

use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use motodesk_commons::models::ids::BayId;
use motodesk_commons::types::{Bay, BayKind};
use motodesk_store::{EntityStore, StorageBackend};

pub const BAYS_PARTITION: &str = "bays";

#[derive(Clone)]
pub struct BayStore {
    backend: Arc<dyn StorageBackend>,
}

impl BayStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<BayId, Bay> for BayStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        BAYS_PARTITION
    }
}

/// Fields a bay update may change. `None` leaves the field alone.
#[derive(Debug, Default, Clone)]
pub struct UpdateBay {
    pub name: Option<String>,
    pub active: Option<bool>,
}

pub struct BayService {
    store: BayStore,
}

impl BayService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: BayStore::new(backend),
        }
    }

    pub(crate) fn store(&self) -> &BayStore {
        &self.store
    }

    pub fn create(&self, name: &str, kind: BayKind) -> ServiceResult<Bay> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("bay name cannot be empty"));
        }
        let bay = Bay::new(name.trim(), kind);
        self.store.put(&bay.id, &bay)?;
        Ok(bay)
    }

    pub fn get(&self, id: &BayId) -> ServiceResult<Bay> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("bay {}", id)))
    }

    pub fn list(&self, active: Option<bool>, limit: usize) -> ServiceResult<Vec<Bay>> {
        let bays = self
            .store
            .scan_all()?
            .into_iter()
            .map(|(_, b)| b)
            .filter(|b| active.map_or(true, |want| b.active == want))
            .take(limit)
            .collect();
        Ok(bays)
    }

    pub fn update(&self, id: &BayId, changes: UpdateBay) -> ServiceResult<Bay> {
        let mut bay = self.get(id)?;
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("bay name cannot be empty"));
            }
            bay.name = name.trim().to_string();
        }
        if let Some(active) = changes.active {
            bay.active = active;
        }
        bay.updated_at = chrono::Utc::now().timestamp_millis();
        self.store.put(id, &bay)?;
        Ok(bay)
    }

    pub fn delete(&self, id: &BayId) -> ServiceResult<()> {
        // Existence check so a bad id maps to 404, not a silent no-op
        self.get(id)?;
        self.store.delete(id)?;
        Ok(())
    }
}
