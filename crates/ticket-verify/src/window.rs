//! Ticket date validity window.
//!
//! A ticket is acceptable when its date is no older than `window_days`
//! before the evaluation time. There is no upper bound: future-dated
//! tickets pass.

use chrono::{DateTime, TimeDelta, Utc};

/// Earliest acceptable ticket date, or `None` if it underflows the calendar
pub fn window_start(now: DateTime<Utc>, window_days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(window_days).and_then(|span| now.checked_sub_signed(span))
}

/// `ticket_date >= now - window_days`
pub fn within_window(ticket_date: DateTime<Utc>, now: DateTime<Utc>, window_days: i64) -> bool {
    match window_start(now, window_days) {
        Some(start) => ticket_date >= start,
        // window reaches past the earliest representable date
        None => true,
    }
}
