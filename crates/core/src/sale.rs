//! Sale record model.
//!
//! A [`SaleRecord`] describes one store's current promotional sale as
//! synthesized by the mock fetcher; a store with no record is simply not
//! on sale. Records are replaced wholesale on every refresh and never
//! mutated in place -- whether a sale is still running is decided at read
//! time by comparing the caller's clock against [`SaleRecord::end_date`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{StoreId, Timestamp};

/// A sale ending within this window of the read clock counts as urgent.
pub const URGENT_WINDOW: Duration = Duration::from_secs(24 * 3600);

// ---------------------------------------------------------------------------
// SaleType
// ---------------------------------------------------------------------------

/// The fixed set of promotion kinds the fetcher can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaleType {
    FlashSale,
    Clearance,
    MemberExclusive,
    SeasonalSale,
    DesignerEvent,
    PrivateSale,
}

impl SaleType {
    /// All variants, in a fixed order (used by the generator's picker).
    pub const ALL: [SaleType; 6] = [
        SaleType::FlashSale,
        SaleType::Clearance,
        SaleType::MemberExclusive,
        SaleType::SeasonalSale,
        SaleType::DesignerEvent,
        SaleType::PrivateSale,
    ];
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SaleType::FlashSale => "Flash Sale",
            SaleType::Clearance => "Clearance",
            SaleType::MemberExclusive => "Member Exclusive",
            SaleType::SeasonalSale => "Seasonal Sale",
            SaleType::DesignerEvent => "Designer Event",
            SaleType::PrivateSale => "Private Sale",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Coarse display priority assigned by the sale policy.
///
/// Declared so the derived ordering sorts `High` before `Medium`; the
/// canonical sale ordering relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
}

// ---------------------------------------------------------------------------
// DiscountRange
// ---------------------------------------------------------------------------

/// A structured discount range in whole percent.
///
/// `min_percent == 0` means an open-ended "Up to N%" promotion. The
/// human-readable label is purely a [`Display`](fmt::Display) concern;
/// aggregation always goes through [`DiscountRange::leading_percent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRange {
    pub min_percent: u8,
    pub max_percent: u8,
}

impl DiscountRange {
    /// Build a range. `min_percent` must not exceed `max_percent`.
    pub fn new(min_percent: u8, max_percent: u8) -> Self {
        debug_assert!(min_percent <= max_percent);
        Self {
            min_percent,
            max_percent,
        }
    }

    /// The leading number of the rendered label ("30-40%" → 30,
    /// "Up to 80%" → 80): the single representative used by the stats
    /// average and the savings heuristic.
    pub fn leading_percent(&self) -> u8 {
        if self.min_percent > 0 {
            self.min_percent
        } else {
            self.max_percent
        }
    }
}

impl fmt::Display for DiscountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_percent == 0 {
            write!(f, "Up to {}%", self.max_percent)
        } else {
            write!(f, "{}-{}%", self.min_percent, self.max_percent)
        }
    }
}

// ---------------------------------------------------------------------------
// SaleRecord
// ---------------------------------------------------------------------------

/// One store's current promotional sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Foreign reference into the external store directory.
    pub store_id: StoreId,
    /// Display name, denormalized from the directory at creation time.
    pub store_name: String,
    pub sale_type: SaleType,
    pub discount: DiscountRange,
    /// Free-text classification (Clothing, Shoes, Beauty, ...).
    pub category: String,
    pub title: String,
    pub description: String,
    pub start_date: Timestamp,
    /// Always later than `start_date`; the generator builds it as
    /// `start_date + 1..=8 days`.
    pub end_date: Timestamp,
    /// Set true at creation and never flipped; expiry is a read-time
    /// comparison against `end_date`, not a mutation.
    pub is_active: bool,
    pub urgency: Urgency,
    pub featured: bool,
    /// 1–4 entries from the generator's fixed vocabulary.
    pub tags: Vec<String>,
}

impl SaleRecord {
    /// Whether the sale is still running at `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        now < self.end_date
    }

    /// Whether the sale is running and ends within [`URGENT_WINDOW`] of
    /// `now` (inclusive at exactly the window edge).
    pub fn is_urgent_at(&self, now: Timestamp) -> bool {
        if !self.is_active_at(now) {
            return false;
        }
        let remaining = self.end_date.signed_duration_since(now);
        remaining <= chrono::Duration::from_std(URGENT_WINDOW).expect("valid duration")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
