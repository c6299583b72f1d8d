use crate::error::BookingError;
use crate::store::BookingStore;
use crate::types::{Booking, BookingStatus, BookingType, Role, User};
use chrono::{Duration, Local};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::{info, warn};
use uuid::Uuid;

/// File-backed stand-in for a real backend: the whole dataset lives in a
/// single JSON document, mirrored in memory and rewritten on every save.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: Arc<PathBuf>,
    state: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    users: Vec<User>,
    bookings: Vec<Booking>,
}

impl LocalStore {
    pub fn open(path: PathBuf) -> Result<Self, BookingError> {
        let mut state = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(err) => {
                    warn!(?err, "Store file is unreadable, starting from scratch");
                    StoreState::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(err) => return Err(err.into()),
        };

        if state.users.is_empty() {
            seed_defaults(&mut state);
            info!(path = %path.display(), "Seeded empty store with default accounts");
        }

        let store = Self {
            path: Arc::new(path),
            state: Arc::new(Mutex::new(state)),
        };
        store.flush()?;
        Ok(store)
    }

    fn flush(&self) -> Result<(), BookingError> {
        let state = self.state.lock().unwrap();
        let contents = serde_json::to_string_pretty(&*state)?;
        fs::write(self.path.as_ref(), contents)?;
        Ok(())
    }
}

fn seed_defaults(state: &mut StoreState) {
    state.users = vec![
        User {
            id: "admin1".into(),
            email: "admin1@kiteschool.pl".into(),
            role: Role::Admin,
        },
        User {
            id: "admin2".into(),
            email: "admin2@kiteschool.pl".into(),
            role: Role::Admin,
        },
        User {
            id: "admin3".into(),
            email: "admin3@kiteschool.pl".into(),
            role: Role::Admin,
        },
        User {
            id: "user_123".into(),
            email: "test@example.com".into(),
            role: Role::User,
        },
    ];

    let now = Local::now();
    state.bookings = vec![
        Booking {
            id: Uuid::new_v4(),
            user_id: "user_123".into(),
            user_email: "test@example.com".into(),
            booking_type: BookingType::Lesson,
            date: (now + Duration::days(2)).date_naive(),
            time: "10:00".into(),
            status: BookingStatus::Pending,
            created_at: now,
            rejection_reason: None,
            price: BookingType::Lesson.quoted_price(),
            details: format!("Booking: {}", BookingType::Lesson.label()),
        },
        Booking {
            id: Uuid::new_v4(),
            user_id: "user_123".into(),
            user_email: "test@example.com".into(),
            booking_type: BookingType::LessonAndEquipment,
            date: (now + Duration::days(3)).date_naive(),
            time: "12:00".into(),
            status: BookingStatus::Accepted,
            created_at: now - Duration::seconds(60),
            rejection_reason: None,
            price: BookingType::LessonAndEquipment.quoted_price(),
            details: format!("Booking: {}", BookingType::LessonAndEquipment.label()),
        },
    ];
}

impl BookingStore for LocalStore {
    fn load_users(&self) -> Result<Vec<User>, BookingError> {
        Ok(self.state.lock().unwrap().users.clone())
    }

    fn save_users(&self, users: Vec<User>) -> Result<(), BookingError> {
        self.state.lock().unwrap().users = users;
        self.flush()
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.state.lock().unwrap().bookings.clone())
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> Result<(), BookingError> {
        self.state.lock().unwrap().bookings = bookings;
        self.flush()
    }
}
