//! Sale monitoring service: periodic concurrent store polling, an
//! in-memory sale cache, and scheduled daily flyer publication.
//!
//! The entry point is [`SaleMonitor`], built from a store directory, a
//! [`SalePolicy`] and a [`MonitorConfig`]. Everything else in this crate
//! supports it: the mock per-store fetch, the record synthesizer and the
//! wholesale-replace cache.

pub mod cache;
pub mod config;
mod fetch;
pub mod generator;
pub mod policy;
pub mod service;

pub use config::MonitorConfig;
pub use policy::{DemoPolicy, SalePolicy};
pub use service::SaleMonitor;
