use crate::types::{Booking, BookingStatus};
use chrono::{DateTime, Duration, Local};

/// Seconds an admin has to accept or reject a pending request.
pub const DECISION_WINDOW_SECS: i64 = 180;

/// Hours below which cancelling an accepted booking incurs the
/// late-cancellation fee.
pub const LATE_CANCELLATION_HOURS: i64 = 24;

/// Seconds left in the decision window, floored at zero. Meaningful only
/// for PENDING bookings; the countdown is advisory and never mutates the
/// booking itself. Callers recompute it on their own polling cadence.
pub fn remaining_decision_seconds(booking: &Booking, now: DateTime<Local>) -> i64 {
    let elapsed = (now - booking.created_at).num_seconds();
    (DECISION_WINDOW_SECS - elapsed).max(0)
}

pub fn decision_window_elapsed(booking: &Booking, now: DateTime<Local>) -> bool {
    remaining_decision_seconds(booking, now) == 0
}

/// Advisory fee flag: true when an accepted booking is being cancelled
/// less than 24 hours before its session starts. Fee collection itself
/// is out of scope, the flag is only surfaced to the caller.
pub fn late_cancellation_fee(booking: &Booking, now: DateTime<Local>) -> bool {
    if booking.status != BookingStatus::Accepted {
        return false;
    }
    match booking.session_start() {
        Some(start) => start - now < Duration::hours(LATE_CANCELLATION_HOURS),
        None => false,
    }
}
