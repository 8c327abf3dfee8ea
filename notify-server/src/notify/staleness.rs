//! Staleness filter for new-order alerts

use chrono::{DateTime, Utc};

/// Default max age of a `pending` order for the new-order alert (minutes)
pub const DEFAULT_THRESHOLD_MINUTES: f64 = 2.0;

/// True iff the order is at most `threshold_minutes` old at `now`
///
/// Age is measured in fractional minutes; an order created in the future
/// counts as fresh.
pub fn is_fresh(created_at: DateTime<Utc>, now: DateTime<Utc>, threshold_minutes: f64) -> bool {
    let age_minutes = (now - created_at).num_milliseconds() as f64 / 60_000.0;
    age_minutes <= threshold_minutes
}
