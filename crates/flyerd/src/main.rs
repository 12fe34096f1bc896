//! `vitrine-flyerd` -- sale monitoring and daily flyer daemon.
//!
//! Polls every boutique in the bundled store directory on a fixed cadence,
//! keeps the latest sales in memory, and publishes a flyer digest at the
//! configured local hour. Published digests are logged by a bus subscriber;
//! downstream consumers would attach the same way.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default | Description                          |
//! |--------------------------|----------|---------|--------------------------------------|
//! | `REFRESH_INTERVAL_HOURS` | no       | `6`     | Hours between automatic refreshes    |
//! | `FLYER_PUBLISH_HOUR`     | no       | `8`     | Local hour of the daily flyer (0-23) |
//! | `SALE_PROBABILITY`       | no       | `0.70`  | Chance a polled store is on sale     |
//! | `FETCH_LATENCY_MS_MIN`   | no       | `100`   | Simulated fetch latency floor (ms)   |
//! | `FETCH_LATENCY_MS_MAX`   | no       | `600`   | Simulated fetch latency ceiling (ms) |

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_directory::{StaticDirectory, StoreDirectory};
use vitrine_monitor::{DemoPolicy, MonitorConfig, SaleMonitor};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MonitorConfig::from_env();
    tracing::info!(
        refresh_interval_secs = config.refresh_interval.as_secs(),
        publish_hour = config.publish_hour,
        sale_probability = config.sale_probability,
        "Starting vitrine-flyerd",
    );

    let directory = Arc::new(StaticDirectory::with_builtin_stores());
    tracing::info!(stores = directory.store_count(), "Store directory loaded");

    let monitor = SaleMonitor::new(directory, Arc::new(DemoPolicy), config);

    // Log every published digest; a real deployment would render or send
    // the flyer from the same subscription.
    let mut digests = monitor.subscribe();
    tokio::spawn(async move {
        loop {
            match digests.recv().await {
                Ok(digest) => {
                    tracing::info!(
                        active = digest.active_sales.len(),
                        urgent = digest.urgent_sales.len(),
                        featured = digest.featured_sales.len(),
                        avg_discount = digest.stats.avg_discount,
                        total_savings = digest.total_savings,
                        "Daily flyer digest published"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Digest logger lagged, some flyers were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Flyer bus closed, digest logger shutting down");
                    break;
                }
            }
        }
    });

    monitor.start_monitoring();

    shutdown_signal().await;

    monitor.stop_monitoring();
    tracing::info!("vitrine-flyerd shut down cleanly");
}

/// Completes on SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
