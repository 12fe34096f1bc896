//! Aggregate sale statistics.
//!
//! Pure logic -- the caller passes a cache snapshot, the directory's store
//! count, and its clock. Empty denominators (no stores, no active sales)
//! yield 0 rather than erroring, so stats are always representable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sale::SaleRecord;
use crate::types::Timestamp;
use crate::views;

/// Aggregate statistics for the currently-active sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    /// Total stores known to the directory.
    pub total_stores: usize,
    /// Stores with a sale still running at the read clock.
    pub stores_with_sales: usize,
    /// `round(100 * stores_with_sales / total_stores)`; 0 when the
    /// directory is empty.
    pub sales_percentage: u32,
    /// Rounded mean of the active sales' leading discount percents; 0
    /// when nothing is on sale.
    pub avg_discount: u32,
    /// Distinct category values among active sales.
    pub categories: usize,
    pub urgent_sales: usize,
    pub featured_sales: usize,
    /// When the cache was last refreshed, if ever.
    pub last_update: Option<Timestamp>,
}

/// Compute [`SalesStats`] for a cache snapshot at `now`.
pub fn compute_stats(
    records: &[SaleRecord],
    total_stores: usize,
    last_update: Option<Timestamp>,
    now: Timestamp,
) -> SalesStats {
    let active = views::active_sales(records, now);

    let sales_percentage = if total_stores > 0 {
        ((active.len() as f64 / total_stores as f64) * 100.0).round() as u32
    } else {
        0
    };

    let avg_discount = if active.is_empty() {
        0
    } else {
        let sum: u32 = active
            .iter()
            .map(|r| u32::from(r.discount.leading_percent()))
            .sum();
        (f64::from(sum) / active.len() as f64).round() as u32
    };

    let categories = active
        .iter()
        .map(|r| r.category.as_str())
        .collect::<HashSet<_>>()
        .len();

    let urgent_sales = active.iter().filter(|r| r.is_urgent_at(now)).count();
    let featured_sales = active.iter().filter(|r| r.featured).count();

    SalesStats {
        total_stores,
        stores_with_sales: active.len(),
        sales_percentage,
        avg_discount,
        categories,
        urgent_sales,
        featured_sales,
        last_update,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
