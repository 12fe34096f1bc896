//! In-memory store of the latest fetched sales.

use std::collections::HashMap;

use vitrine_core::{SaleRecord, StoreId, Timestamp};

/// Latest known sale per store, replaced wholesale on every refresh.
///
/// The cache never mutates individual entries: a refresh swaps the whole
/// map, so a store that dropped its sale disappears and readers never see
/// a half-applied batch. Expiry is the reader's concern.
#[derive(Debug, Default)]
pub struct SaleCache {
    entries: HashMap<StoreId, SaleRecord>,
    last_update: Option<Timestamp>,
}

impl SaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire cache with `sales` and records `refreshed_at`.
    pub fn replace_all(&mut self, sales: Vec<SaleRecord>, refreshed_at: Timestamp) {
        self.entries = sales
            .into_iter()
            .map(|sale| (sale.store_id.clone(), sale))
            .collect();
        self.last_update = Some(refreshed_at);
    }

    /// The cached sale for one store, if any.
    pub fn get(&self, store_id: &str) -> Option<&SaleRecord> {
        self.entries.get(store_id)
    }

    /// Clones all cached records, in no particular order.
    pub fn snapshot(&self) -> Vec<SaleRecord> {
        self.entries.values().cloned().collect()
    }

    /// When the cache was last refreshed; `None` until the first refresh.
    pub fn last_update(&self) -> Option<Timestamp> {
        self.last_update
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use vitrine_core::{DiscountRange, SaleType, Urgency};

    use super::*;

    fn sale_for(store_id: &str) -> SaleRecord {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        SaleRecord {
            store_id: store_id.into(),
            store_name: store_id.to_uppercase(),
            sale_type: SaleType::Clearance,
            discount: DiscountRange::new(20, 30),
            category: "Shoes".into(),
            title: format!("Clearance at {store_id}"),
            description: "Final reductions".into(),
            start_date: start,
            end_date: start + chrono::Duration::days(3),
            is_active: true,
            urgency: Urgency::Medium,
            featured: false,
            tags: vec!["final-sale".into()],
        }
    }

    #[test]
    fn starts_empty_with_no_refresh_recorded() {
        let cache = SaleCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.last_update(), None);
        assert_eq!(cache.get("maison-verre"), None);
    }

    #[test]
    fn replace_all_installs_the_batch_and_timestamp() {
        let mut cache = SaleCache::new();
        let refreshed = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        cache.replace_all(vec![sale_for("maison-verre"), sale_for("atelier-noir")], refreshed);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.last_update(), Some(refreshed));
        assert!(cache.get("maison-verre").is_some());
        assert!(cache.get("atelier-noir").is_some());
    }

    #[test]
    fn replace_all_drops_stores_missing_from_the_new_batch() {
        let mut cache = SaleCache::new();
        let first = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let second = first + chrono::Duration::hours(6);

        cache.replace_all(vec![sale_for("maison-verre"), sale_for("atelier-noir")], first);
        cache.replace_all(vec![sale_for("atelier-noir")], second);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("maison-verre"), None);
        assert!(cache.get("atelier-noir").is_some());
        assert_eq!(cache.last_update(), Some(second));
    }

    #[test]
    fn empty_batch_clears_the_cache_but_counts_as_a_refresh() {
        let mut cache = SaleCache::new();
        let first = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let second = first + chrono::Duration::hours(6);

        cache.replace_all(vec![sale_for("maison-verre")], first);
        cache.replace_all(Vec::new(), second);

        assert!(cache.is_empty());
        assert_eq!(cache.last_update(), Some(second));
    }

    #[test]
    fn snapshot_clones_every_record() {
        let mut cache = SaleCache::new();
        let refreshed = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        cache.replace_all(vec![sale_for("maison-verre"), sale_for("la-vitrine")], refreshed);

        let mut ids: Vec<_> = cache.snapshot().into_iter().map(|s| s.store_id).collect();
        ids.sort();
        assert_eq!(ids, vec!["la-vitrine".to_string(), "maison-verre".to_string()]);
    }
}
