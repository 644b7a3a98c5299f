//! Job card response DTO with role-based revenue redaction.

use serde::Serialize;

use motodesk_commons::models::ids::{BayId, CustomerId, JobCardId, PartId, StaffId};
use motodesk_commons::models::Role;
use motodesk_commons::types::{JobCard, JobStatus, LineItem, ServiceCategory};
use motodesk_session::rbac;

/// A line item as the caller is allowed to see it.
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub part_id: PartId,
    pub part_name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<i64>,
}

/// A job card as the caller is allowed to see it.
///
/// Revenue fields (`cost`, `advance_payment`, `remaining_payment`,
/// `labor_cost`, line-item prices) are omitted entirely for roles without
/// financial visibility. Redaction happens here, in one place, so list and
/// single responses cannot drift apart.
#[derive(Debug, Serialize)]
pub struct JobCardResponse {
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
    pub line_items: Vec<LineItemResponse>,
    pub photo_refs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_payment: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_payment: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub delivered_at: Option<i64>,
}

impl JobCardResponse {
    pub fn from_card(card: JobCard, role: Role) -> Self {
        let financial = rbac::can_view_financials(role);
        let money = |value: i64| financial.then_some(value);

        Self {
            id: card.id,
            customer_id: card.customer_id,
            vehicle_registration: card.vehicle_registration,
            vehicle_model: card.vehicle_model,
            odometer_km: card.odometer_km,
            category: card.category,
            status: card.status,
            description: card.description,
            bay_id: card.bay_id,
            technician_id: card.technician_id,
            line_items: card
                .line_items
                .into_iter()
                .map(|li: LineItem| LineItemResponse {
                    part_id: li.part_id,
                    part_name: li.part_name,
                    quantity: li.quantity,
                    unit_price: money(li.unit_price),
                })
                .collect(),
            photo_refs: card.photo_refs,
            labor_cost: money(card.labor_cost),
            cost: money(card.cost),
            advance_payment: money(card.advance_payment),
            remaining_payment: money(card.remaining_payment),
            created_at: card.created_at,
            updated_at: card.updated_at,
            delivered_at: card.delivered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_money() -> JobCard {
        let mut card = JobCard::new(
            CustomerId::new("cust_1"),
            "KA-01-AB-1234",
            "Splendor Plus",
            ServiceCategory::PaidService,
        );
        card.line_items.push(LineItem {
            part_id: PartId::new("p1"),
            part_name: "Engine oil".to_string(),
            unit_price: 450,
            quantity: 2,
        });
        card.labor_cost = 300;
        card.advance_payment = 500;
        card.recompute_totals();
        card
    }

    #[test]
    fn test_management_sees_revenue() {
        for role in [Role::Admin, Role::Manager] {
            let dto = JobCardResponse::from_card(card_with_money(), role);
            assert_eq!(dto.cost, Some(1200));
            assert_eq!(dto.remaining_payment, Some(700));
            assert_eq!(dto.line_items[0].unit_price, Some(450));
        }
    }

    #[test]
    fn test_floor_roles_see_no_revenue() {
        for role in [Role::JobCardClerk, Role::Technician, Role::ServiceStaff] {
            let dto = JobCardResponse::from_card(card_with_money(), role);
            assert!(dto.cost.is_none());
            assert!(dto.advance_payment.is_none());
            assert!(dto.remaining_payment.is_none());
            assert!(dto.labor_cost.is_none());
            assert!(dto.line_items[0].unit_price.is_none());
            // Non-revenue content survives redaction
            assert_eq!(dto.line_items[0].quantity, 2);
        }
    }

    #[test]
    fn test_redacted_fields_are_absent_from_json() {
        let dto = JobCardResponse::from_card(card_with_money(), Role::Technician);
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("cost").is_none());
        assert!(json["line_items"][0].get("unit_price").is_none());
    }
}
