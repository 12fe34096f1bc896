//! Simulated per-store sale fetch.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use vitrine_core::SaleRecord;
use vitrine_directory::StoreDirectory;

use crate::config::MonitorConfig;
use crate::generator;
use crate::policy::SalePolicy;

/// Polls one store and returns its current sale, if it has one.
///
/// Never fails: any per-store problem is logged and reported as "no sale"
/// so that a single bad store cannot poison a refresh batch.
pub(crate) async fn fetch_one_store_sale(
    directory: Arc<dyn StoreDirectory>,
    policy: Arc<dyn SalePolicy>,
    config: MonitorConfig,
    store_id: String,
) -> Option<SaleRecord> {
    simulate_latency(&config).await;

    if !rand::rng().random_bool(config.sale_probability) {
        debug!(%store_id, "Store has no sale running");
        return None;
    }

    let store_name = match directory.resolve_store_name(&store_id) {
        Ok(name) => name,
        Err(error) => {
            warn!(%store_id, %error, "Skipping store, name resolution failed");
            return None;
        }
    };

    let sale = generator::synthesize_sale(&store_id, &store_name, policy.as_ref(), chrono::Utc::now());
    debug!(%store_id, discount = %sale.discount, sale_type = %sale.sale_type, "Fetched sale");
    Some(sale)
}

/// Sleeps for a random duration inside the configured latency band.
async fn simulate_latency(config: &MonitorConfig) {
    let min = config.fetch_latency_min.as_millis() as u64;
    let max = config.fetch_latency_max.as_millis() as u64;
    let delay = {
        let mut rng = rand::rng();
        rng.random_range(min..=max)
    };
    tokio::time::sleep(Duration::from_millis(delay)).await;
}
