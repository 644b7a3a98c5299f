//! Date-range reporting over the live stores.
//!
//! Reports are plain scans and folds; nothing here writes. Each report
//! struct serializes straight onto the API response. Ranges are epoch
//! millis, open-ended on either side.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ServiceResult;
use crate::services::job_cards::JobCardStore;
use crate::services::loyalty::{CustomerStore, PointsLedgerStore};
use crate::services::staffing::{AttendanceStore, StaffStore};
use motodesk_commons::models::ids::StaffId;
use motodesk_commons::types::Staff;
use motodesk_commons::{JobStatus, LoyaltyTier, PointsEntryKind, ServiceCategory};
use motodesk_store::{EntityStore, StorageBackend};

/// Epoch-millis range, open-ended on either side.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl ReportRange {
    fn contains(&self, ts: i64) -> bool {
        self.from.map_or(true, |from| ts >= from) && self.to.map_or(true, |to| ts <= to)
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRevenue {
    pub category: ServiceCategory,
    pub jobs: usize,
    pub cost: i64,
}

/// Revenue over delivered jobs in range. Management-only at the API layer.
#[derive(Debug, Serialize)]
pub struct RevenueReport {
    pub delivered_jobs: usize,
    pub total_cost: i64,
    pub total_advance: i64,
    pub total_remaining: i64,
    pub by_category: Vec<CategoryRevenue>,
}

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: JobStatus,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: ServiceCategory,
    pub count: usize,
}

/// Job throughput: counts over cards opened in range, turnaround over
/// cards delivered in range.
#[derive(Debug, Serialize)]
pub struct JobsReport {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<CategoryCount>,
    pub delivered: usize,
    /// Mean created-to-delivered time; absent when nothing was delivered.
    pub average_turnaround_millis: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StaffAttendance {
    pub staff_id: StaffId,
    pub name: String,
    pub days_present: usize,
    pub worked_millis: i64,
}

#[derive(Debug, Serialize)]
pub struct AttendanceReport {
    pub staff: Vec<StaffAttendance>,
}

#[derive(Debug, Serialize)]
pub struct TierCount {
    pub tier: LoyaltyTier,
    pub customers: usize,
}

/// Points movement in range plus the program's current liability.
#[derive(Debug, Serialize)]
pub struct LoyaltyReport {
    pub points_issued: i64,
    pub points_redeemed: i64,
    pub points_refunded: i64,
    pub points_adjusted: i64,
    /// Sum of all customers' available points, regardless of range.
    pub outstanding_points: i64,
    pub customers_by_tier: Vec<TierCount>,
}

pub struct ReportsService {
    cards: JobCardStore,
    attendance: AttendanceStore,
    staff: StaffStore,
    customers: CustomerStore,
    ledger: PointsLedgerStore,
}

impl ReportsService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            cards: JobCardStore::new(backend.clone()),
            attendance: AttendanceStore::new(backend.clone()),
            staff: StaffStore::new(backend.clone()),
            customers: CustomerStore::new(backend.clone()),
            ledger: PointsLedgerStore::new(backend),
        }
    }

    pub fn revenue(&self, range: ReportRange) -> ServiceResult<RevenueReport> {
        let mut report = RevenueReport {
            delivered_jobs: 0,
            total_cost: 0,
            total_advance: 0,
            total_remaining: 0,
            by_category: Vec::new(),
        };
        let mut by_category: BTreeMap<&'static str, CategoryRevenue> = BTreeMap::new();

        for (_, card) in self.cards.scan_all()? {
            match card.delivered_at {
                Some(ts) if range.contains(ts) => {}
                _ => continue,
            }
            report.delivered_jobs += 1;
            report.total_cost += card.cost;
            report.total_advance += card.advance_payment;
            report.total_remaining += card.remaining_payment;

            let bucket = by_category
                .entry(card.category.as_str())
                .or_insert(CategoryRevenue {
                    category: card.category,
                    jobs: 0,
                    cost: 0,
                });
            bucket.jobs += 1;
            bucket.cost += card.cost;
        }

        report.by_category = by_category.into_values().collect();
        Ok(report)
    }

    pub fn jobs(&self, range: ReportRange) -> ServiceResult<JobsReport> {
        let mut by_status: BTreeMap<&'static str, StatusCount> = BTreeMap::new();
        let mut by_category: BTreeMap<&'static str, CategoryCount> = BTreeMap::new();
        let mut total = 0;
        let mut delivered = 0;
        let mut turnaround_sum = 0i64;

        for (_, card) in self.cards.scan_all()? {
            if range.contains(card.created_at) {
                total += 1;
                by_status
                    .entry(card.status.as_str())
                    .or_insert(StatusCount {
                        status: card.status,
                        count: 0,
                    })
                    .count += 1;
                by_category
                    .entry(card.category.as_str())
                    .or_insert(CategoryCount {
                        category: card.category,
                        count: 0,
                    })
                    .count += 1;
            }
            if let Some(delivered_at) = card.delivered_at {
                if range.contains(delivered_at) {
                    delivered += 1;
                    turnaround_sum += (delivered_at - card.created_at).max(0);
                }
            }
        }

        Ok(JobsReport {
            total,
            by_status: by_status.into_values().collect(),
            by_category: by_category.into_values().collect(),
            delivered,
            average_turnaround_millis: if delivered > 0 {
                Some(turnaround_sum / delivered as i64)
            } else {
                None
            },
        })
    }

    pub fn attendance(&self, range: ReportRange) -> ServiceResult<AttendanceReport> {
        let names: BTreeMap<String, Staff> = self
            .staff
            .scan_all()?
            .into_iter()
            .map(|(_, s)| (s.id.to_string(), s))
            .collect();

        let mut rows: BTreeMap<String, StaffAttendance> = BTreeMap::new();
        for (_, record) in self.attendance.scan_all()? {
            if !range.contains(record.check_in_at) {
                continue;
            }
            let key = record.staff_id.to_string();
            let row = rows.entry(key.clone()).or_insert_with(|| StaffAttendance {
                staff_id: record.staff_id.clone(),
                name: names
                    .get(&key)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                days_present: 0,
                worked_millis: 0,
            });
            row.days_present += 1;
            row.worked_millis += record.worked_millis().unwrap_or(0);
        }

        Ok(AttendanceReport {
            staff: rows.into_values().collect(),
        })
    }

    pub fn loyalty(&self, range: ReportRange) -> ServiceResult<LoyaltyReport> {
        let mut report = LoyaltyReport {
            points_issued: 0,
            points_redeemed: 0,
            points_refunded: 0,
            points_adjusted: 0,
            outstanding_points: 0,
            customers_by_tier: Vec::new(),
        };

        for (_, entry) in self.ledger.scan_all()? {
            if !range.contains(entry.created_at) {
                continue;
            }
            match entry.kind {
                PointsEntryKind::Earn => report.points_issued += entry.points,
                PointsEntryKind::Redeem => report.points_redeemed += -entry.points,
                PointsEntryKind::Refund => report.points_refunded += entry.points,
                PointsEntryKind::Adjust => report.points_adjusted += entry.points,
            }
        }

        let mut per_tier: BTreeMap<LoyaltyTier, usize> = BTreeMap::new();
        for (_, customer) in self.customers.scan_all()? {
            report.outstanding_points += customer.available_points;
            *per_tier.entry(customer.tier()).or_insert(0) += 1;
        }
        report.customers_by_tier = LoyaltyTier::all()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                customers: per_tier.get(&tier).copied().unwrap_or(0),
            })
            .collect();

        Ok(report)
    }
}
