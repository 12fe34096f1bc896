//! Pluggable assignment of display flags to fetched sales.

use rand::Rng;

use vitrine_core::{DiscountRange, Timestamp, Urgency};

/// Chance that the demo policy marks a sale as high urgency.
const DEMO_HIGH_URGENCY_PROBABILITY: f64 = 0.5;
/// Chance that the demo policy features a sale.
const DEMO_FEATURED_PROBABILITY: f64 = 0.3;

/// Decides how a freshly fetched sale is flagged for display.
///
/// The synthesizer hands every new record to a policy before caching it.
/// Implementations get the discount and the sale's lifetime so they can
/// derive the flags from real signals; the built-in [`DemoPolicy`] ignores
/// them and rolls dice instead.
pub trait SalePolicy: Send + Sync {
    /// Display priority of a sale running until `end_date`, seen at `now`.
    fn urgency(&self, discount: DiscountRange, now: Timestamp, end_date: Timestamp) -> Urgency;

    /// Whether the sale is spotlighted in flyers and storefront rails.
    fn featured(&self, discount: DiscountRange, now: Timestamp, end_date: Timestamp) -> bool;
}

/// Coin-flip policy used by the demo data feed.
///
/// Roughly half of all sales come out high urgency and about a third are
/// featured, independent of each other and of the discount.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoPolicy;

impl SalePolicy for DemoPolicy {
    fn urgency(&self, _discount: DiscountRange, _now: Timestamp, _end_date: Timestamp) -> Urgency {
        if rand::rng().random_bool(DEMO_HIGH_URGENCY_PROBABILITY) {
            Urgency::High
        } else {
            Urgency::Medium
        }
    }

    fn featured(&self, _discount: DiscountRange, _now: Timestamp, _end_date: Timestamp) -> bool {
        rand::rng().random_bool(DEMO_FEATURED_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_policy_emits_both_urgencies() {
        let policy = DemoPolicy;
        let now = Timestamp::default();
        let end = now + chrono::Duration::days(3);
        let mut seen_high = false;
        let mut seen_medium = false;
        for _ in 0..200 {
            match policy.urgency(DiscountRange::new(20, 30), now, end) {
                Urgency::High => seen_high = true,
                Urgency::Medium => seen_medium = true,
            }
        }
        assert!(seen_high && seen_medium);
    }

    #[test]
    fn custom_policy_can_pin_flags() {
        struct AlwaysUrgent;
        impl SalePolicy for AlwaysUrgent {
            fn urgency(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> Urgency {
                Urgency::High
            }
            fn featured(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> bool {
                false
            }
        }

        let policy = AlwaysUrgent;
        let now = Timestamp::default();
        let end = now + chrono::Duration::days(1);
        for _ in 0..20 {
            assert_eq!(policy.urgency(DiscountRange::new(0, 80), now, end), Urgency::High);
            assert!(!policy.featured(DiscountRange::new(0, 80), now, end));
        }
    }
}
