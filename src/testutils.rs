use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::error::BookingError;
use crate::store::BookingStore;
use crate::types::{Booking, BookingStatus, BookingType, Role, User};

pub fn admin_fixture() -> User {
    User {
        id: "admin1".into(),
        email: "admin1@kiteschool.pl".into(),
        role: Role::Admin,
    }
}

pub fn user_fixture() -> User {
    User {
        id: "user_123".into(),
        email: "test@example.com".into(),
        role: Role::User,
    }
}

pub fn booking_fixture(user_id: &str, date: NaiveDate, time: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        user_id: user_id.into(),
        user_email: format!("{user_id}@example.com"),
        booking_type: BookingType::Lesson,
        date,
        time: time.into(),
        status,
        created_at: Local::now(),
        rejection_reason: None,
        price: BookingType::Lesson.quoted_price(),
        details: format!("Booking: {}", BookingType::Lesson.label()),
    }
}

pub struct MockStoreInner {
    /// When false, booking reads and writes fail with a store error.
    /// User reads always succeed so identity resolution keeps working.
    pub bookings_succeed: AtomicBool,
    pub calls_to_load_users: AtomicU64,
    pub calls_to_save_users: AtomicU64,
    pub calls_to_load_bookings: AtomicU64,
    pub calls_to_save_bookings: AtomicU64,
    pub users: Mutex<Vec<User>>,
    pub bookings: Mutex<Vec<Booking>>,
}

#[derive(Clone)]
pub struct MockStore(pub Arc<MockStoreInner>);

impl MockStore {
    pub fn new() -> Self {
        Self(Arc::new(MockStoreInner {
            bookings_succeed: AtomicBool::new(true),
            calls_to_load_users: AtomicU64::default(),
            calls_to_save_users: AtomicU64::default(),
            calls_to_load_bookings: AtomicU64::default(),
            calls_to_save_bookings: AtomicU64::default(),
            users: Mutex::new(vec![admin_fixture(), user_fixture()]),
            bookings: Mutex::default(),
        }))
    }

    fn bookings_result(&self) -> Result<(), BookingError> {
        match self.0.bookings_succeed.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(BookingError::Store("supposed to fail".into())),
        }
    }
}

impl BookingStore for MockStore {
    fn load_users(&self) -> Result<Vec<User>, BookingError> {
        self.0.calls_to_load_users.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.users.lock().unwrap().clone())
    }

    fn save_users(&self, users: Vec<User>) -> Result<(), BookingError> {
        self.0.calls_to_save_users.fetch_add(1, Ordering::SeqCst);
        *self.0.users.lock().unwrap() = users;
        Ok(())
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.0.calls_to_load_bookings.fetch_add(1, Ordering::SeqCst);
        self.bookings_result()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> Result<(), BookingError> {
        self.0.calls_to_save_bookings.fetch_add(1, Ordering::SeqCst);
        self.bookings_result()?;
        *self.0.bookings.lock().unwrap() = bookings;
        Ok(())
    }
}
