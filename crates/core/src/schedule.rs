//! Refresh staleness and wall-clock alignment math.
//!
//! Both timers the monitor runs are driven from here, with the clock as a
//! parameter so the arithmetic is testable without sleeping.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::types::Timestamp;

/// Delay until the next strictly-future occurrence of `target_hour:00:00`
/// on the local clock.
///
/// At exactly `target_hour:00:00` the next occurrence is tomorrow's -- the
/// current instant never schedules a zero-delay fire. The recurring
/// period after the first fire is a fixed 24 h, so a DST transition
/// shifts the local fire time by the offset change until the schedule is
/// restarted.
///
/// `target_hour` must be in `0..24`.
pub fn delay_until_hour(target_hour: u32, now: NaiveDateTime) -> Duration {
    let today = now
        .date()
        .and_hms_opt(target_hour, 0, 0)
        .expect("target hour in 0..24");

    let target = if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    };

    (target - now).to_std().expect("target is in the future")
}

/// Whether the cache needs a refresh: never updated, or the elapsed time
/// since the last update strictly exceeds `interval`.
pub fn is_stale(last_update: Option<Timestamp>, interval: Duration, now: Timestamp) -> bool {
    match last_update {
        None => true,
        Some(last) => {
            now.signed_duration_since(last)
                > chrono::Duration::from_std(interval).expect("valid duration")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
