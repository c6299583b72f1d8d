use crate::availability::available_slots;
use crate::decision::decision_window_elapsed;
use crate::error::BookingError;
use crate::store::BookingStore;
use crate::types::{is_operating_hour, Booking, BookingStatus, BookingType, Role, User};
use chrono::{Duration, Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

/// Minimum gap between submitting a request and the requested session
/// date, measured at calendar-day granularity.
pub const MIN_LEAD_HOURS: i64 = 48;

const DEFAULT_REJECTION_REASON: &str = "No availability";

/// Owns every mutation of the booking collection. Holds an explicit
/// store handle; there is no ambient shared state.
#[derive(Clone)]
pub struct LifecycleManager<S: BookingStore> {
    store: S,
}

impl<S: BookingStore> LifecycleManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends a new PENDING request. No slot lock is taken here: several
    /// pending requests may target the same date and time, exclusivity is
    /// enforced when one of them is accepted.
    pub fn create_booking(
        &self,
        requester: &User,
        booking_type: BookingType,
        date: NaiveDate,
        time: &str,
    ) -> Result<Booking, BookingError> {
        let now = Local::now();
        if !is_operating_hour(time) {
            return Err(BookingError::Validation(format!(
                "{time} is not a bookable slot"
            )));
        }
        let earliest = (now + Duration::hours(MIN_LEAD_HOURS)).date_naive();
        if date < earliest {
            return Err(BookingError::Validation(format!(
                "requests must be submitted at least {MIN_LEAD_HOURS} hours ahead, earliest bookable date is {earliest}"
            )));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: requester.id.clone(),
            user_email: requester.email.clone(),
            booking_type,
            date,
            time: time.to_string(),
            status: BookingStatus::Pending,
            created_at: now,
            rejection_reason: None,
            price: booking_type.quoted_price(),
            details: format!("Booking: {}", booking_type.label()),
        };

        let mut bookings = self.store.load_bookings()?;
        bookings.push(booking.clone());
        self.store.save_bookings(bookings)?;

        // Stands in for the admin notification e-mail.
        info!(
            booking_id = %booking.id,
            user = %booking.user_email,
            date = %booking.date,
            time = %booking.time,
            "Booking request created, admins should be notified"
        );
        Ok(booking)
    }

    /// Applies one state-machine transition. Authorization is checked
    /// before the current state, so an unauthorized caller always sees
    /// an authorization failure regardless of the booking's state.
    pub fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
        actor: &User,
        reason: Option<String>,
    ) -> Result<Booking, BookingError> {
        let now = Local::now();
        let mut bookings = self.store.load_bookings()?;
        let index = bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or(BookingError::NotFound(booking_id))?;

        match new_status {
            BookingStatus::Pending => {
                return Err(BookingError::InvalidTransition(
                    "bookings cannot return to pending".into(),
                ))
            }
            BookingStatus::Accepted | BookingStatus::Rejected => {
                if actor.role != Role::Admin {
                    return Err(BookingError::Authorization(
                        "only admins may accept or reject requests".into(),
                    ));
                }
                if bookings[index].status != BookingStatus::Pending {
                    return Err(BookingError::InvalidTransition(format!(
                        "only pending requests can be decided, booking is {:?}",
                        bookings[index].status
                    )));
                }
                if decision_window_elapsed(&bookings[index], now) {
                    return Err(BookingError::InvalidTransition(
                        "decision window elapsed, request can no longer be decided".into(),
                    ));
                }
                if new_status == BookingStatus::Accepted {
                    // Read-then-write without atomicity: a concurrent accept
                    // on the same slot is last-write-wins, matching the
                    // store's contract.
                    let taken = bookings.iter().any(|b| {
                        b.id != booking_id
                            && b.status == BookingStatus::Accepted
                            && b.date == bookings[index].date
                            && b.time == bookings[index].time
                    });
                    if taken {
                        return Err(BookingError::Conflict {
                            date: bookings[index].date,
                            time: bookings[index].time.clone(),
                        });
                    }
                }
                bookings[index].status = new_status;
                if new_status == BookingStatus::Rejected {
                    bookings[index].rejection_reason =
                        Some(reason.unwrap_or_else(|| DEFAULT_REJECTION_REASON.into()));
                }
            }
            BookingStatus::Cancelled => {
                let booking = &bookings[index];
                if actor.role != Role::Admin && actor.id != booking.user_id {
                    return Err(BookingError::Authorization(
                        "only the requester or an admin may cancel a booking".into(),
                    ));
                }
                if !matches!(
                    booking.status,
                    BookingStatus::Pending | BookingStatus::Accepted
                ) {
                    return Err(BookingError::InvalidTransition(format!(
                        "{:?} bookings cannot be cancelled",
                        booking.status
                    )));
                }
                bookings[index].status = BookingStatus::Cancelled;
            }
        }

        let updated = bookings[index].clone();
        self.store.save_bookings(bookings)?;

        // Stands in for the status-change e-mail to the requester.
        info!(
            booking_id = %updated.id,
            user = %updated.user_email,
            status = ?updated.status,
            actor = %actor.email,
            "Booking status changed, requester should be notified"
        );
        Ok(updated)
    }

    /// Open slots for a date, computed against the persisted bookings.
    pub fn available_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingError> {
        let bookings = self.store.load_bookings()?;
        Ok(available_slots(date, &bookings))
    }

    pub fn find_booking(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.store
            .load_bookings()?
            .into_iter()
            .find(|b| b.id == booking_id)
            .ok_or(BookingError::NotFound(booking_id))
    }

    pub fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        let mut bookings: Vec<_> = self
            .store
            .load_bookings()?
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    pub fn all_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let mut bookings = self.store.load_bookings()?;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    pub fn users(&self) -> Result<Vec<User>, BookingError> {
        self.store.load_users()
    }
}
