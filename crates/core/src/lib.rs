//! Vitrine domain model and pure sale-view logic.
//!
//! This crate has zero internal dependencies: every function takes its
//! data (and, where relevant, the clock) as arguments so the monitor
//! service, the daemon, and the tests all share one implementation.
//!
//! - [`sale`] -- the sale record model produced by the mock fetcher.
//! - [`views`] -- active/urgent/featured/by-category views and the
//!   canonical display ordering.
//! - [`stats`] -- aggregate statistics over the active sales.
//! - [`digest`] -- the daily flyer digest assembled from the views.
//! - [`schedule`] -- refresh staleness and wall-clock alignment math.

pub mod digest;
pub mod sale;
pub mod schedule;
pub mod stats;
pub mod types;
pub mod views;

pub use digest::FlyerDigest;
pub use sale::{DiscountRange, SaleRecord, SaleType, Urgency};
pub use stats::SalesStats;
pub use types::{StoreId, Timestamp};
