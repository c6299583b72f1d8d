use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published operating hours: the bookable slot labels for any date,
/// in ascending order.
pub const OPERATING_HOURS: [&str; 9] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

pub fn is_operating_hour(time: &str) -> bool {
    OPERATING_HOURS.contains(&time)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

/// Authenticated account descriptor. Also serves as the actor identity
/// passed into every mutating operation; authentication itself happens
/// at the service boundary, never in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    Lesson,
    Equipment,
    LessonAndEquipment,
}

impl BookingType {
    pub fn label(&self) -> &'static str {
        match self {
            BookingType::Lesson => "Lesson",
            BookingType::Equipment => "Equipment",
            BookingType::LessonAndEquipment => "Lesson + Equipment",
        }
    }

    /// Quoted price in PLN. Advisory only, nothing in the lifecycle
    /// rules depends on it.
    pub fn quoted_price(&self) -> u32 {
        match self {
            BookingType::Lesson => 180,
            BookingType::Equipment => 120,
            BookingType::LessonAndEquipment => 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub user_email: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Local>,
    pub rejection_reason: Option<String>,
    pub price: u32,
    pub details: String,
}

impl Booking {
    /// Wall-clock start of the requested session, `date` combined with
    /// the slot label. `None` if the stored slot label is malformed.
    pub fn session_start(&self) -> Option<DateTime<Local>> {
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        self.date.and_time(time).and_local_timezone(Local).earliest()
    }
}
