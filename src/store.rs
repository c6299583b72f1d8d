use crate::error::BookingError;
use crate::types::{Booking, User};

/// Durable gateway for the user and booking collections. Implementations
/// must return the empty collection for a store that holds no data yet;
/// writes replace the whole collection (the dataset is small by design).
pub trait BookingStore: Clone + Send + Sync + 'static {
    fn load_users(&self) -> Result<Vec<User>, BookingError>;
    fn save_users(&self, users: Vec<User>) -> Result<(), BookingError>;
    fn load_bookings(&self) -> Result<Vec<Booking>, BookingError>;
    fn save_bookings(&self, bookings: Vec<Booking>) -> Result<(), BookingError>;
}
