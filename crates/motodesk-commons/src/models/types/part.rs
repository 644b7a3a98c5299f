//! Spare part catalog entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::PartId;

/// Spare part catalog entity.
///
/// `part_number` is the human-facing code and is unique across the catalog.
/// Stock never goes below zero; adding a line item to a job card decrements
/// it and removing the line item puts it back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub part_number: String,
    pub name: String,
    pub category: Option<String>,
    pub unit_price: i64,
    pub stock_quantity: u32,
    /// Stock level that should trigger a reorder, if the shop tracks one.
    pub reorder_level: Option<u32>,
    pub active: bool,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
}

impl Part {
    /// Create an active part with a generated id.
    pub fn new(
        part_number: impl Into<String>,
        name: impl Into<String>,
        unit_price: i64,
        stock_quantity: u32,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: PartId::generate(),
            part_number: part_number.into(),
            name: name.into(),
            category: None,
            unit_price,
            stock_quantity,
            reorder_level: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether stock has fallen to or below the reorder level.
    #[inline]
    pub fn needs_reorder(&self) -> bool {
        matches!(self.reorder_level, Some(level) if self.stock_quantity <= level)
    }
}
