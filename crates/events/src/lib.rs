//! Flyer publication infrastructure.
//!
//! - [`FlyerBus`] -- in-process publish/subscribe hub for daily flyer
//!   digests, backed by `tokio::sync::broadcast`, retaining the most
//!   recent digest for late subscribers.

pub mod bus;

pub use bus::FlyerBus;
