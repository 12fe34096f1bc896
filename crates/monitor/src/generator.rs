//! Synthesizes plausible sale records for the demo feed.
//!
//! Real deployments would parse a merchant API response here; the demo
//! build rolls one up from fixed vocabularies instead. Everything except
//! the display flags is decided locally, the flags are delegated to the
//! configured [`SalePolicy`].

use rand::seq::index;
use rand::Rng;

use vitrine_core::{DiscountRange, SaleRecord, SaleType, Timestamp};

use crate::policy::SalePolicy;

/// Merchandise categories a sale can cover.
pub const CATEGORIES: [&str; 7] = [
    "Clothing",
    "Shoes",
    "Beauty",
    "Handbags",
    "Jewelry",
    "Accessories",
    "Home",
];

/// Discount ranges seen in the wild. A zero minimum means the flyer
/// renders it as an "up to" deal.
const DISCOUNT_PRESETS: [(u8, u8); 10] = [
    (10, 20),
    (15, 25),
    (20, 30),
    (25, 40),
    (30, 40),
    (40, 50),
    (50, 60),
    (0, 50),
    (0, 60),
    (0, 80),
];

/// Tag vocabulary; each sale carries one to four distinct entries.
const TAG_VOCABULARY: [&str; 8] = [
    "limited-time",
    "online-only",
    "in-store",
    "new-markdowns",
    "final-sale",
    "members-only",
    "free-shipping",
    "curated",
];

/// Blurbs paired with the synthesized sales.
const DESCRIPTIONS: [&str; 6] = [
    "Hand-picked markdowns from this season's collection",
    "Final reductions on runway favorites",
    "Members preview pricing across the boutique",
    "Seasonal edit marked down while stock lasts",
    "Back-room archive pieces released at a discount",
    "Deeper cuts on already-reduced lines",
];

/// Longest lifetime of a synthesized sale, in days.
const MAX_SALE_DURATION_DAYS: i64 = 8;

/// Builds a fresh sale for `store_id`, active from `now`.
///
/// The record always starts active; whether it counts as urgent later is a
/// function of its end date, not of anything decided here.
pub fn synthesize_sale(
    store_id: &str,
    store_name: &str,
    policy: &dyn SalePolicy,
    now: Timestamp,
) -> SaleRecord {
    let mut rng = rand::rng();

    let sale_type = SaleType::ALL[rng.random_range(0..SaleType::ALL.len())];
    let (min, max) = DISCOUNT_PRESETS[rng.random_range(0..DISCOUNT_PRESETS.len())];
    let discount = DiscountRange::new(min, max);
    let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
    let description = DESCRIPTIONS[rng.random_range(0..DESCRIPTIONS.len())];

    let duration_days = rng.random_range(1..=MAX_SALE_DURATION_DAYS);
    let end_date = now + chrono::Duration::days(duration_days);

    let tag_count = rng.random_range(1..=4);
    let tags = index::sample(&mut rng, TAG_VOCABULARY.len(), tag_count)
        .iter()
        .map(|i| TAG_VOCABULARY[i].to_string())
        .collect();

    SaleRecord {
        store_id: store_id.to_string(),
        store_name: store_name.to_string(),
        title: format!("{sale_type} at {store_name}"),
        description: description.to_string(),
        sale_type,
        discount,
        category: category.to_string(),
        start_date: now,
        end_date,
        is_active: true,
        urgency: policy.urgency(discount, now, end_date),
        featured: policy.featured(discount, now, end_date),
        tags,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use vitrine_core::Urgency;

    use super::*;

    struct PinnedPolicy;

    impl SalePolicy for PinnedPolicy {
        fn urgency(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> Urgency {
            Urgency::Medium
        }
        fn featured(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> bool {
            true
        }
    }

    #[test]
    fn synthesized_sale_is_well_formed() {
        let now = Utc::now();
        for _ in 0..100 {
            let sale = synthesize_sale("maison-verre", "Maison Verre", &DemoLike, now);
            assert_eq!(sale.store_id, "maison-verre");
            assert_eq!(sale.store_name, "Maison Verre");
            assert!(sale.is_active);
            assert!(sale.title.contains("Maison Verre"));
            assert!(sale.discount.min_percent <= sale.discount.max_percent);
            assert!(DISCOUNT_PRESETS.contains(&(sale.discount.min_percent, sale.discount.max_percent)));
            assert!(CATEGORIES.contains(&sale.category.as_str()));
        }
    }

    #[test]
    fn end_date_lands_within_the_allowed_window() {
        let now = Utc::now();
        for _ in 0..100 {
            let sale = synthesize_sale("atelier-noir", "Atelier Noir", &DemoLike, now);
            let lifetime = sale.end_date.signed_duration_since(sale.start_date);
            assert!(lifetime >= chrono::Duration::days(1));
            assert!(lifetime <= chrono::Duration::days(MAX_SALE_DURATION_DAYS));
            assert_eq!(sale.start_date, now);
        }
    }

    #[test]
    fn tags_are_distinct_and_from_the_vocabulary() {
        let now = Utc::now();
        for _ in 0..100 {
            let sale = synthesize_sale("la-vitrine", "La Vitrine", &DemoLike, now);
            assert!((1..=4).contains(&sale.tags.len()));
            for tag in &sale.tags {
                assert!(TAG_VOCABULARY.contains(&tag.as_str()));
            }
            let mut deduped = sale.tags.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), sale.tags.len());
        }
    }

    #[test]
    fn display_flags_come_from_the_policy() {
        let now = Utc::now();
        for _ in 0..50 {
            let sale = synthesize_sale("salon-doree", "Salon Doree", &PinnedPolicy, now);
            assert_eq!(sale.urgency, Urgency::Medium);
            assert!(sale.featured);
        }
    }

    /// Stand-in for [`crate::policy::DemoPolicy`] that keeps these tests
    /// independent of its probabilities.
    struct DemoLike;

    impl SalePolicy for DemoLike {
        fn urgency(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> Urgency {
            Urgency::High
        }
        fn featured(&self, _: DiscountRange, _: Timestamp, _: Timestamp) -> bool {
            false
        }
    }
}
