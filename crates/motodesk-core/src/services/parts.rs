//! Parts catalog and stock tracking.
//!
//! Stock movements are check-then-set under a single lock so concurrent
//! line-item additions cannot drive a quantity negative.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ServiceError, ServiceResult};
use motodesk_commons::models::ids::PartId;
use motodesk_commons::types::Part;
use motodesk_store::{EntityStore, StorageBackend};

pub const PARTS_PARTITION: &str = "parts";

#[derive(Clone)]
pub struct PartStore {
    backend: Arc<dyn StorageBackend>,
}

impl PartStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<PartId, Part> for PartStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        PARTS_PARTITION
    }
}

/// New catalog entry.
#[derive(Debug, Clone)]
pub struct CreatePart {
    pub part_number: String,
    pub name: String,
    pub category: Option<String>,
    pub unit_price: i64,
    pub stock_quantity: u32,
    pub reorder_level: Option<u32>,
}

/// Fields a part update may change. `None` leaves the field alone.
#[derive(Debug, Default, Clone)]
pub struct UpdatePart {
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<i64>,
    pub reorder_level: Option<u32>,
    pub active: Option<bool>,
}

/// Filters for part listings.
#[derive(Debug, Default, Clone)]
pub struct PartFilter {
    pub active: Option<bool>,
    /// Only parts at or below their reorder level.
    pub low_stock: bool,
    pub limit: usize,
}

pub struct PartsService {
    store: PartStore,
    stock_lock: Mutex<()>,
}

impl PartsService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: PartStore::new(backend),
            stock_lock: Mutex::new(()),
        }
    }

    fn find_by_part_number(&self, part_number: &str) -> ServiceResult<Option<Part>> {
        let hit = self
            .store
            .scan_all()?
            .into_iter()
            .map(|(_, p)| p)
            .find(|p| p.part_number == part_number);
        Ok(hit)
    }

    pub fn create(&self, input: CreatePart) -> ServiceResult<Part> {
        let part_number = input.part_number.trim().to_string();
        if part_number.is_empty() {
            return Err(ServiceError::validation("part_number cannot be empty"));
        }
        if input.name.trim().is_empty() {
            return Err(ServiceError::validation("part name cannot be empty"));
        }
        if input.unit_price < 0 {
            return Err(ServiceError::validation("unit_price cannot be negative"));
        }
        if self.find_by_part_number(&part_number)?.is_some() {
            return Err(ServiceError::conflict(format!(
                "part number {} already exists",
                part_number
            )));
        }

        let mut part = Part::new(part_number, input.name.trim(), input.unit_price, input.stock_quantity);
        part.category = input.category;
        part.reorder_level = input.reorder_level;
        self.store.put(&part.id, &part)?;
        Ok(part)
    }

    pub fn get(&self, id: &PartId) -> ServiceResult<Part> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("part {}", id)))
    }

    pub fn list(&self, filter: PartFilter) -> ServiceResult<Vec<Part>> {
        let parts = self
            .store
            .scan_all()?
            .into_iter()
            .map(|(_, p)| p)
            .filter(|p| filter.active.map_or(true, |want| p.active == want))
            .filter(|p| !filter.low_stock || p.needs_reorder())
            .take(filter.limit)
            .collect();
        Ok(parts)
    }

    pub fn update(&self, id: &PartId, changes: UpdatePart) -> ServiceResult<Part> {
        let mut part = self.get(id)?;
        if let Some(part_number) = changes.part_number {
            let part_number = part_number.trim().to_string();
            if part_number.is_empty() {
                return Err(ServiceError::validation("part_number cannot be empty"));
            }
            if part_number != part.part_number {
                if self.find_by_part_number(&part_number)?.is_some() {
                    return Err(ServiceError::conflict(format!(
                        "part number {} already exists",
                        part_number
                    )));
                }
                part.part_number = part_number;
            }
        }
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("part name cannot be empty"));
            }
            part.name = name.trim().to_string();
        }
        if let Some(category) = changes.category {
            part.category = Some(category);
        }
        if let Some(unit_price) = changes.unit_price {
            if unit_price < 0 {
                return Err(ServiceError::validation("unit_price cannot be negative"));
            }
            part.unit_price = unit_price;
        }
        if let Some(reorder_level) = changes.reorder_level {
            part.reorder_level = Some(reorder_level);
        }
        if let Some(active) = changes.active {
            part.active = active;
        }
        part.updated_at = chrono::Utc::now().timestamp_millis();
        self.store.put(id, &part)?;
        Ok(part)
    }

    pub fn delete(&self, id: &PartId) -> ServiceResult<()> {
        self.get(id)?;
        self.store.delete(id)?;
        Ok(())
    }

    /// Apply a signed delta to stock. Rejects deltas that would drive the
    /// quantity below zero.
    pub fn adjust_stock(&self, id: &PartId, delta: i64) -> ServiceResult<Part> {
        let _guard = self.stock_lock.lock();
        let mut part = self.get(id)?;
        let new_quantity = part.stock_quantity as i64 + delta;
        if new_quantity < 0 {
            return Err(ServiceError::conflict(format!(
                "stock for {} cannot go below zero ({} on hand, delta {})",
                part.part_number, part.stock_quantity, delta
            )));
        }
        part.stock_quantity = new_quantity as u32;
        part.updated_at = chrono::Utc::now().timestamp_millis();
        self.store.put(id, &part)?;
        Ok(part)
    }

    /// Take `quantity` units out of stock for a job-card line item.
    ///
    /// Returns the part so the caller can snapshot its name and price.
    /// Inactive parts and insufficient stock are conflicts.
    pub fn consume_stock(&self, id: &PartId, quantity: u32) -> ServiceResult<Part> {
        let _guard = self.stock_lock.lock();
        let mut part = self.get(id)?;
        if !part.active {
            return Err(ServiceError::conflict(format!(
                "part {} is inactive",
                part.part_number
            )));
        }
        if part.stock_quantity < quantity {
            return Err(ServiceError::conflict(format!(
                "insufficient stock for {}: {} on hand, {} requested",
                part.part_number, part.stock_quantity, quantity
            )));
        }
        part.stock_quantity -= quantity;
        part.updated_at = chrono::Utc::now().timestamp_millis();
        self.store.put(id, &part)?;
        Ok(part)
    }

    /// Put `quantity` units back, from a removed line item.
    ///
    /// A part deleted from the catalog in the meantime is a no-op, not an
    /// error; the line item removal must still succeed.
    pub fn restore_stock(&self, id: &PartId, quantity: u32) -> ServiceResult<()> {
        let _guard = self.stock_lock.lock();
        let mut part = match self.store.get(id)? {
            Some(part) => part,
            None => {
                log::warn!("restoring stock for deleted part {}; dropping {} units", id, quantity);
                return Ok(());
            }
        };
        part.stock_quantity = part.stock_quantity.saturating_add(quantity);
        part.updated_at = chrono::Utc::now().timestamp_millis();
        self.store.put(id, &part)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motodesk_store::InMemoryBackend;

    fn service() -> PartsService {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(InMemoryBackend::with_partitions(&[PARTS_PARTITION]));
        PartsService::new(backend)
    }

    fn oil_filter() -> CreatePart {
        CreatePart {
            part_number: "FLT-100".to_string(),
            name: "Oil filter".to_string(),
            category: Some("filters".to_string()),
            unit_price: 250,
            stock_quantity: 10,
            reorder_level: Some(3),
        }
    }

    #[test]
    fn test_duplicate_part_number_rejected() {
        let svc = service();
        svc.create(oil_filter()).unwrap();
        assert!(matches!(
            svc.create(oil_filter()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_stock_never_negative() {
        let svc = service();
        let part = svc.create(oil_filter()).unwrap();

        let part = svc.adjust_stock(&part.id, -4).unwrap();
        assert_eq!(part.stock_quantity, 6);

        assert!(matches!(
            svc.adjust_stock(&part.id, -7),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_consume_and_restore() {
        let svc = service();
        let part = svc.create(oil_filter()).unwrap();

        let snapshot = svc.consume_stock(&part.id, 3).unwrap();
        assert_eq!(snapshot.stock_quantity, 7);
        assert_eq!(snapshot.unit_price, 250);

        svc.restore_stock(&part.id, 3).unwrap();
        assert_eq!(svc.get(&part.id).unwrap().stock_quantity, 10);
    }

    #[test]
    fn test_consume_more_than_on_hand_rejected() {
        let svc = service();
        let part = svc.create(oil_filter()).unwrap();
        assert!(matches!(
            svc.consume_stock(&part.id, 11),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_inactive_part_cannot_be_consumed() {
        let svc = service();
        let part = svc.create(oil_filter()).unwrap();
        svc.update(
            &part.id,
            UpdatePart {
                active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(matches!(
            svc.consume_stock(&part.id, 1),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn test_low_stock_filter() {
        let svc = service();
        let part = svc.create(oil_filter()).unwrap();
        svc.adjust_stock(&part.id, -8).unwrap(); // 2 left, reorder level 3

        let low = svc
            .list(PartFilter {
                low_stock: true,
                limit: 100,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(low.len(), 1);
    }
}
