//! Freshness rule shared by every service mode.
//!
//! Thresholds are expressed in minutes. An entry is fresh while the number of
//! whole minutes elapsed since its observation is strictly less than the
//! threshold. Observations from the future count as fresh to tolerate clock skew.

use chrono::{DateTime, Utc};

pub const DEFAULT_DATA_FRESHNESS_MINUTES: u64 = 10;

/// Freshness check against the current wall clock.
pub fn is_fresh(observed_at: i64, threshold_minutes: u64) -> bool {
    is_fresh_at(observed_at, threshold_minutes, Utc::now())
}

pub fn is_fresh_at(observed_at: i64, threshold_minutes: u64, now: DateTime<Utc>) -> bool {
    // truncates toward zero, so anything under a minute in the future is 0
    let elapsed_minutes = now.timestamp().saturating_sub(observed_at) / 60;
    elapsed_minutes < i64::try_from(threshold_minutes).unwrap_or(i64::MAX)
}
