//! Daily flyer digest.
//!
//! The digest is never stored: it is a pure function of a cache snapshot
//! and the clock, assembled freshly for every publication (and for every
//! direct read through the facade).

use serde::{Deserialize, Serialize};

use crate::sale::SaleRecord;
use crate::stats::{compute_stats, SalesStats};
use crate::types::Timestamp;
use crate::views;

/// How many of the top-ordered active sales make the "top deals" strip.
pub const TOP_DEALS_LIMIT: usize = 6;

/// Display heuristic: every leading discount point counts as this many
/// currency units of "savings". Not a real currency calculation.
pub const SAVINGS_PER_DISCOUNT_POINT: u32 = 10;

/// The aggregated daily view broadcast to flyer subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyerDigest {
    /// When the digest was assembled.
    pub date: Timestamp,
    /// All running sales, in canonical order.
    pub active_sales: Vec<SaleRecord>,
    pub urgent_sales: Vec<SaleRecord>,
    pub featured_sales: Vec<SaleRecord>,
    pub stats: SalesStats,
    /// The first [`TOP_DEALS_LIMIT`] entries of `active_sales`.
    pub top_deals: Vec<SaleRecord>,
    /// Distinct categories among active sales, in first-appearance order.
    pub categories: Vec<String>,
    /// Mock aggregate savings figure (see [`SAVINGS_PER_DISCOUNT_POINT`]).
    pub total_savings: u32,
}

/// Assemble a [`FlyerDigest`] for a cache snapshot at `now`.
pub fn assemble_digest(
    records: &[SaleRecord],
    total_stores: usize,
    last_update: Option<Timestamp>,
    now: Timestamp,
) -> FlyerDigest {
    let active_sales = views::active_sales(records, now);
    let urgent_sales = views::urgent_sales(records, now);
    let featured_sales = views::featured_sales(records, now);
    let stats = compute_stats(records, total_stores, last_update, now);

    let top_deals: Vec<SaleRecord> = active_sales.iter().take(TOP_DEALS_LIMIT).cloned().collect();

    let mut categories: Vec<String> = Vec::new();
    for sale in &active_sales {
        if !categories.iter().any(|c| c == &sale.category) {
            categories.push(sale.category.clone());
        }
    }

    let total_savings = calculate_total_savings(&active_sales);

    FlyerDigest {
        date: now,
        active_sales,
        urgent_sales,
        featured_sales,
        stats,
        top_deals,
        categories,
        total_savings,
    }
}

/// Mock savings scalar: `Σ (SAVINGS_PER_DISCOUNT_POINT × leading percent)`
/// over the given sales.
pub fn calculate_total_savings(sales: &[SaleRecord]) -> u32 {
    sales
        .iter()
        .map(|r| SAVINGS_PER_DISCOUNT_POINT * u32::from(r.discount.leading_percent()))
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
