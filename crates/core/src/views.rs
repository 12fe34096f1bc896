//! Derived sale views.
//!
//! Pure logic -- no cache access. The caller snapshots the sale cache and
//! passes the records in together with its clock, so every view is
//! re-derived on each call and never goes stale on its own.
//!
//! All views share one canonical ordering (see [`compare_sales`]): it is
//! what every displayed sale list uses.

use std::cmp::Ordering;

use crate::sale::SaleRecord;
use crate::types::Timestamp;

/// Canonical display ordering for sale lists.
///
/// `High` urgency sorts first; ties order by discount depth descending
/// (`max_percent`, then `min_percent`), and finally by store name so the
/// result is total and deterministic.
pub fn compare_sales(a: &SaleRecord, b: &SaleRecord) -> Ordering {
    a.urgency
        .cmp(&b.urgency)
        .then_with(|| b.discount.max_percent.cmp(&a.discount.max_percent))
        .then_with(|| b.discount.min_percent.cmp(&a.discount.min_percent))
        .then_with(|| a.store_name.cmp(&b.store_name))
}

/// All sales still running at `now`, in canonical order.
pub fn active_sales(records: &[SaleRecord], now: Timestamp) -> Vec<SaleRecord> {
    let mut active: Vec<SaleRecord> = records
        .iter()
        .filter(|r| r.is_active_at(now))
        .cloned()
        .collect();
    active.sort_by(compare_sales);
    active
}

/// Active sales whose category matches `category`, case-insensitively.
pub fn sales_by_category(records: &[SaleRecord], category: &str, now: Timestamp) -> Vec<SaleRecord> {
    active_sales(records, now)
        .into_iter()
        .filter(|r| r.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Active sales flagged as featured by the sale policy.
pub fn featured_sales(records: &[SaleRecord], now: Timestamp) -> Vec<SaleRecord> {
    active_sales(records, now)
        .into_iter()
        .filter(|r| r.featured)
        .collect()
}

/// Active sales ending within the urgency window of `now`.
pub fn urgent_sales(records: &[SaleRecord], now: Timestamp) -> Vec<SaleRecord> {
    active_sales(records, now)
        .into_iter()
        .filter(|r| r.is_urgent_at(now))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
