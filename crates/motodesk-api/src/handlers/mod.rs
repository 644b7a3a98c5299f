//! HTTP request handlers, grouped by resource.

use serde::Deserialize;

use motodesk_configs::LimitsSettings;

pub mod audit;
pub mod auth;
pub mod bays;
pub mod customers;
pub mod job_cards;
pub mod parts;
pub mod reports;
pub mod rewards;
pub mod staff;
pub mod users;

/// Query string shared by list endpoints that only page.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Resolve the page size for a list request, clamped to the configured cap.
pub(crate) fn effective_limit(requested: Option<usize>, limits: &LimitsSettings) -> usize {
    requested
        .unwrap_or(limits.default_page_size)
        .min(limits.max_page_size)
}
