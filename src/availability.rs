use crate::types::{Booking, BookingStatus, OPERATING_HOURS};
use chrono::NaiveDate;

/// Open slots for a calendar date, ascending by hour. A slot is taken
/// only by an ACCEPTED booking on that date; pending, rejected and
/// cancelled bookings never block it.
pub fn available_slots(date: NaiveDate, bookings: &[Booking]) -> Vec<String> {
    OPERATING_HOURS
        .iter()
        .filter(|hour| {
            !bookings.iter().any(|booking| {
                booking.status == BookingStatus::Accepted
                    && booking.date == date
                    && booking.time == **hour
            })
        })
        .map(|hour| hour.to_string())
        .collect()
}
