//! Elapsed-time math shared by the scorer and the derived contact labels.

use chrono::{DateTime, Utc};

/// Sentinel for "never contacted". Larger than any plausible multiple of a
/// cadence interval, so such contacts read as maximally overdue.
pub const NEVER_CONTACTED_DAYS: i64 = 9999;

/// Whole days elapsed since `last`, clamped at zero so a future timestamp
/// (clock skew) never yields a negative elapsed time.
pub fn days_since(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match last {
        Some(at) => (now - at).num_days().max(0),
        None => NEVER_CONTACTED_DAYS,
    }
}

/// Human bucket for an elapsed-day count: "Today", "Yesterday", then day,
/// 30-day month, and 360-day year buckets.
pub fn format_relative(days: i64) -> String {
    if days <= 0 {
        return "Today".to_string();
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 30 {
        return format!("{days} days ago");
    }
    let months = days / 30;
    if months < 12 {
        return if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{months} months ago")
        };
    }
    let years = months / 12;
    if years == 1 {
        "1 year ago".to_string()
    } else {
        format!("{years} years ago")
    }
}
