//! Monitor configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Hours between automatic cache refreshes.
pub const DEFAULT_REFRESH_INTERVAL_HOURS: u64 = 6;
/// Local hour of day (0-23) at which the daily flyer is published.
pub const DEFAULT_PUBLISH_HOUR: u32 = 8;
/// Probability that a polled store turns out to be running a sale.
pub const DEFAULT_SALE_PROBABILITY: f64 = 0.70;
/// Simulated per-store fetch latency bounds, in milliseconds.
pub const DEFAULT_FETCH_LATENCY_MS: (u64, u64) = (100, 600);

/// Runtime knobs for the sale monitor.
///
/// Every field has a sensible default; `from_env` overrides them from the
/// process environment and panics on values that are malformed or out of
/// range, so a misconfigured daemon dies at startup instead of minutes
/// later.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Cadence of the automatic refresh timer.
    pub refresh_interval: Duration,
    /// Local wall-clock hour at which the daily flyer fires.
    pub publish_hour: u32,
    /// Chance that a store has a sale when fetched.
    pub sale_probability: f64,
    /// Lower bound of the simulated fetch latency.
    pub fetch_latency_min: Duration,
    /// Upper bound of the simulated fetch latency.
    pub fetch_latency_max: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_HOURS * 3600),
            publish_hour: DEFAULT_PUBLISH_HOUR,
            sale_probability: DEFAULT_SALE_PROBABILITY,
            fetch_latency_min: Duration::from_millis(DEFAULT_FETCH_LATENCY_MS.0),
            fetch_latency_max: Duration::from_millis(DEFAULT_FETCH_LATENCY_MS.1),
        }
    }
}

impl MonitorConfig {
    /// Loads configuration from the environment, falling back to defaults
    /// for anything unset. A variable that is set but does not parse
    /// panics rather than silently running on the default.
    ///
    /// | Variable                 | Default | Meaning                              |
    /// |--------------------------|---------|--------------------------------------|
    /// | `REFRESH_INTERVAL_HOURS` | `6`     | Hours between automatic refreshes    |
    /// | `FLYER_PUBLISH_HOUR`     | `8`     | Local hour of the daily flyer (0-23) |
    /// | `SALE_PROBABILITY`       | `0.70`  | Chance a store is on sale            |
    /// | `FETCH_LATENCY_MS_MIN`   | `100`   | Simulated fetch latency floor (ms)   |
    /// | `FETCH_LATENCY_MS_MAX`   | `600`   | Simulated fetch latency ceiling (ms) |
    pub fn from_env() -> Self {
        let refresh_hours: u64 = env::var("REFRESH_INTERVAL_HOURS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_INTERVAL_HOURS.to_string())
            .parse()
            .expect("REFRESH_INTERVAL_HOURS must be a valid u64");
        let publish_hour: u32 = env::var("FLYER_PUBLISH_HOUR")
            .unwrap_or_else(|_| DEFAULT_PUBLISH_HOUR.to_string())
            .parse()
            .expect("FLYER_PUBLISH_HOUR must be a valid u32");
        let sale_probability: f64 = env::var("SALE_PROBABILITY")
            .unwrap_or_else(|_| DEFAULT_SALE_PROBABILITY.to_string())
            .parse()
            .expect("SALE_PROBABILITY must be a valid f64");
        let latency_min: u64 = env::var("FETCH_LATENCY_MS_MIN")
            .unwrap_or_else(|_| DEFAULT_FETCH_LATENCY_MS.0.to_string())
            .parse()
            .expect("FETCH_LATENCY_MS_MIN must be a valid u64");
        let latency_max: u64 = env::var("FETCH_LATENCY_MS_MAX")
            .unwrap_or_else(|_| DEFAULT_FETCH_LATENCY_MS.1.to_string())
            .parse()
            .expect("FETCH_LATENCY_MS_MAX must be a valid u64");

        let config = Self {
            refresh_interval: Duration::from_secs(refresh_hours * 3600),
            publish_hour,
            sale_probability,
            fetch_latency_min: Duration::from_millis(latency_min),
            fetch_latency_max: Duration::from_millis(latency_max),
        };
        config.validate();
        config
    }

    /// Panics if any knob is out of range.
    ///
    /// Runs automatically in `from_env` and at service construction, so
    /// hand-built configs get the same startup check.
    pub fn validate(&self) {
        assert!(
            self.refresh_interval > Duration::ZERO,
            "REFRESH_INTERVAL_HOURS must be at least 1"
        );
        assert!(
            self.publish_hour < 24,
            "FLYER_PUBLISH_HOUR must be in 0..24, got {}",
            self.publish_hour
        );
        assert!(
            (0.0..=1.0).contains(&self.sale_probability),
            "SALE_PROBABILITY must be in 0.0..=1.0, got {}",
            self.sale_probability
        );
        assert!(
            self.fetch_latency_min <= self.fetch_latency_max,
            "FETCH_LATENCY_MS_MIN must not exceed FETCH_LATENCY_MS_MAX"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let config = MonitorConfig::default();
        config.validate();
        assert_eq!(config.refresh_interval, Duration::from_secs(6 * 3600));
        assert_eq!(config.publish_hour, 8);
        assert_eq!(config.sale_probability, 0.70);
        assert_eq!(config.fetch_latency_min, Duration::from_millis(100));
        assert_eq!(config.fetch_latency_max, Duration::from_millis(600));
    }

    #[test]
    #[should_panic(expected = "SALE_PROBABILITY must be a valid f64")]
    fn set_but_unparsable_variable_fails_fast() {
        // The only test in this binary that touches the process
        // environment; nothing else calls from_env.
        env::set_var("SALE_PROBABILITY", "abc");
        let _ = MonitorConfig::from_env();
    }

    #[test]
    #[should_panic(expected = "FLYER_PUBLISH_HOUR")]
    fn publish_hour_out_of_range_panics() {
        let config = MonitorConfig {
            publish_hour: 24,
            ..MonitorConfig::default()
        };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "SALE_PROBABILITY")]
    fn probability_out_of_range_panics() {
        let config = MonitorConfig {
            sale_probability: 1.5,
            ..MonitorConfig::default()
        };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "FETCH_LATENCY_MS_MIN")]
    fn inverted_latency_bounds_panic() {
        let config = MonitorConfig {
            fetch_latency_min: Duration::from_millis(500),
            fetch_latency_max: Duration::from_millis(100),
            ..MonitorConfig::default()
        };
        config.validate();
    }
}
