//! The sale monitoring service facade.
//!
//! [`SaleMonitor`] owns the sale cache, the flyer bus and the two
//! background timers, and is the only type applications need to touch.
//! Handles are cheap clones over shared state, so the daemon, the digest
//! logger and the tests can all hold one without coordination.

use std::sync::{Arc, Mutex, RwLock};

use chrono::{Local, Utc};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use vitrine_core::digest::assemble_digest;
use vitrine_core::stats::compute_stats;
use vitrine_core::{schedule, views, FlyerDigest, SaleRecord, SalesStats};
use vitrine_directory::StoreDirectory;
use vitrine_events::FlyerBus;

use crate::cache::SaleCache;
use crate::config::MonitorConfig;
use crate::fetch;
use crate::policy::SalePolicy;

/// Cadence of the daily flyer once the first publication has fired.
const DAILY_PERIOD: std::time::Duration = std::time::Duration::from_secs(24 * 3600);

/// Cloneable handle to one sale monitoring service.
///
/// Exactly one cache and at most one pair of live timers exist per
/// constructed service, no matter how many handles are around.
#[derive(Clone)]
pub struct SaleMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    directory: Arc<dyn StoreDirectory>,
    policy: Arc<dyn SalePolicy>,
    config: MonitorConfig,
    cache: RwLock<SaleCache>,
    bus: FlyerBus,
    /// Present while the background timers are running; cancelling it is
    /// how `stop_monitoring` reaches them.
    timers: Mutex<Option<CancellationToken>>,
}

impl SaleMonitor {
    /// Builds a service over the given collaborators.
    ///
    /// Panics if `config` is out of range, so a bad hand-built config
    /// dies here instead of inside a detached timer task.
    pub fn new(
        directory: Arc<dyn StoreDirectory>,
        policy: Arc<dyn SalePolicy>,
        config: MonitorConfig,
    ) -> Self {
        config.validate();
        Self {
            inner: Arc::new(MonitorInner {
                directory,
                policy,
                config,
                cache: RwLock::new(SaleCache::new()),
                bus: FlyerBus::default(),
                timers: Mutex::new(None),
            }),
        }
    }

    // -----------------------------------------------------------------
    // Refresh
    // -----------------------------------------------------------------

    /// Polls every store in the directory concurrently and replaces the
    /// cache with the outcome.
    ///
    /// Per-store failures are logged and treated as "no sale"; a failure
    /// to list the directory itself skips the refresh entirely, leaving
    /// the previous snapshot (and its staleness) in place.
    pub async fn fetch_all_store_sales(&self) -> Vec<SaleRecord> {
        let store_ids = match self.inner.directory.list_store_ids() {
            Ok(ids) => ids,
            Err(error) => {
                error!(%error, "Store directory unavailable, skipping refresh");
                return Vec::new();
            }
        };

        let mut tasks = Vec::with_capacity(store_ids.len());
        for store_id in &store_ids {
            tasks.push(tokio::spawn(fetch::fetch_one_store_sale(
                Arc::clone(&self.inner.directory),
                Arc::clone(&self.inner.policy),
                self.inner.config.clone(),
                store_id.clone(),
            )));
        }

        let results = futures::future::join_all(tasks).await;
        let mut sales = Vec::new();
        for (store_id, result) in store_ids.iter().zip(results) {
            match result {
                Ok(Some(sale)) => sales.push(sale),
                Ok(None) => {}
                Err(error) => {
                    error!(%store_id, %error, "Sale fetch task failed");
                }
            }
        }

        let refreshed_at = Utc::now();
        {
            let mut cache = self.inner.cache.write().expect("sale cache lock poisoned");
            cache.replace_all(sales.clone(), refreshed_at);
        }
        info!(
            stores = store_ids.len(),
            sales = sales.len(),
            "Sale cache refreshed"
        );
        sales
    }

    /// Refreshes only when the cache has gone stale.
    async fn auto_refresh(&self) {
        if self.needs_update() {
            self.fetch_all_store_sales().await;
        } else {
            debug!("Sale cache still fresh, skipping refresh");
        }
    }

    /// Whether the cache is due for a refresh: never refreshed, or older
    /// than the configured interval.
    pub fn needs_update(&self) -> bool {
        let last_update = self
            .inner
            .cache
            .read()
            .expect("sale cache lock poisoned")
            .last_update();
        schedule::is_stale(last_update, self.inner.config.refresh_interval, Utc::now())
    }

    // -----------------------------------------------------------------
    // Read views
    // -----------------------------------------------------------------

    /// All currently running sales in canonical order (high urgency
    /// first, then deepest discount, then store name).
    pub fn active_sales(&self) -> Vec<SaleRecord> {
        let (records, _) = self.cache_snapshot();
        views::active_sales(&records, Utc::now())
    }

    /// Active sales in one category (case-insensitive match).
    pub fn sales_by_category(&self, category: &str) -> Vec<SaleRecord> {
        let (records, _) = self.cache_snapshot();
        views::sales_by_category(&records, category, Utc::now())
    }

    /// Active sales flagged as featured.
    pub fn featured_sales(&self) -> Vec<SaleRecord> {
        let (records, _) = self.cache_snapshot();
        views::featured_sales(&records, Utc::now())
    }

    /// Active sales ending within the urgency window.
    pub fn urgent_sales(&self) -> Vec<SaleRecord> {
        let (records, _) = self.cache_snapshot();
        views::urgent_sales(&records, Utc::now())
    }

    /// The cached sale for one store, if it exists and is still running.
    pub fn sale_for_store(&self, store_id: &str) -> Option<SaleRecord> {
        let now = Utc::now();
        self.inner
            .cache
            .read()
            .expect("sale cache lock poisoned")
            .get(store_id)
            .filter(|sale| sale.is_active_at(now))
            .cloned()
    }

    /// Aggregate statistics over the current cache.
    pub fn sales_stats(&self) -> SalesStats {
        let (records, last_update) = self.cache_snapshot();
        compute_stats(&records, self.total_stores(), last_update, Utc::now())
    }

    /// Assembles the flyer digest from the current cache without
    /// publishing it.
    pub fn daily_flyer_data(&self) -> FlyerDigest {
        let (records, last_update) = self.cache_snapshot();
        assemble_digest(&records, self.total_stores(), last_update, Utc::now())
    }

    fn cache_snapshot(&self) -> (Vec<SaleRecord>, Option<vitrine_core::Timestamp>) {
        let cache = self.inner.cache.read().expect("sale cache lock poisoned");
        (cache.snapshot(), cache.last_update())
    }

    fn total_stores(&self) -> usize {
        match self.inner.directory.list_store_ids() {
            Ok(ids) => ids.len(),
            Err(error) => {
                warn!(%error, "Store directory unavailable, reporting zero stores");
                0
            }
        }
    }

    // -----------------------------------------------------------------
    // Publication
    // -----------------------------------------------------------------

    /// Builds today's digest from the cache as-is and broadcasts it.
    pub fn generate_daily_flyer(&self) -> FlyerDigest {
        let digest = self.daily_flyer_data();
        info!(
            active = digest.active_sales.len(),
            urgent = digest.urgent_sales.len(),
            featured = digest.featured_sales.len(),
            total_savings = digest.total_savings,
            "Daily flyer generated"
        );
        self.inner.bus.publish(digest.clone());
        digest
    }

    /// Manual fetch-then-publish, bypassing both timers. Resolves with
    /// the digest it broadcast.
    pub async fn trigger_flyer_generation(&self) -> FlyerDigest {
        self.fetch_all_store_sales().await;
        self.generate_daily_flyer()
    }

    /// Subscribes to future flyer digests. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<FlyerDigest> {
        self.inner.bus.subscribe()
    }

    /// The most recently published digest, for subscribers that arrived
    /// after the fact.
    pub fn latest_digest(&self) -> Option<FlyerDigest> {
        self.inner.bus.latest()
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Starts the refresh loop and the daily publication timer.
    ///
    /// Requires an ambient tokio runtime; without one there is nothing to
    /// drive the timers, so this logs a warning and leaves the service
    /// stopped. Calling it while already monitoring is a logged no-op.
    pub fn start_monitoring(&self) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No async runtime available, sale monitoring not started");
                return;
            }
        };

        let mut timers = self.inner.timers.lock().expect("timer state lock poisoned");
        if timers.is_some() {
            warn!("Sale monitoring already running, ignoring start");
            return;
        }

        let cancel = CancellationToken::new();
        runtime.spawn(self.clone().refresh_loop(cancel.clone()));
        runtime.spawn(self.clone().daily_loop(cancel.clone()));
        *timers = Some(cancel);

        info!(
            refresh_interval_secs = self.inner.config.refresh_interval.as_secs(),
            publish_hour = self.inner.config.publish_hour,
            "Sale monitoring started"
        );
    }

    /// Stops both timers. Safe to call repeatedly or when never started.
    ///
    /// Cancellation is observed between loop iterations, so an in-flight
    /// refresh runs to completion; only future invocations are dropped.
    pub fn stop_monitoring(&self) {
        let mut timers = self.inner.timers.lock().expect("timer state lock poisoned");
        match timers.take() {
            Some(cancel) => {
                cancel.cancel();
                info!("Sale monitoring stopped");
            }
            None => debug!("Sale monitoring is not running"),
        }
    }

    /// Whether the background timers are currently running.
    pub fn is_monitoring(&self) -> bool {
        self.inner
            .timers
            .lock()
            .expect("timer state lock poisoned")
            .is_some()
    }

    // -----------------------------------------------------------------
    // Timer loops
    // -----------------------------------------------------------------

    async fn refresh_loop(self, cancel: CancellationToken) {
        // Startup fetch is unconditional; the interval ticks after it are
        // gated by needs_update so spurious wakeups stay cheap.
        self.fetch_all_store_sales().await;

        let mut interval = tokio::time::interval(self.inner.config.refresh_interval);
        interval.tick().await; // completes immediately, consume it
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Refresh timer stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.auto_refresh().await;
                }
            }
        }
    }

    async fn daily_loop(self, cancel: CancellationToken) {
        let delay =
            schedule::delay_until_hour(self.inner.config.publish_hour, Local::now().naive_local());
        info!(
            publish_hour = self.inner.config.publish_hour,
            first_publish_in_secs = delay.as_secs(),
            "Daily flyer publication scheduled"
        );

        let first_tick = tokio::time::Instant::now() + delay;
        let mut interval = tokio::time::interval_at(first_tick, DAILY_PERIOD);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Daily flyer timer stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.generate_daily_flyer();
                }
            }
        }
    }
}
