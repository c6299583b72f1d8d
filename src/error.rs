use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Failure classification for every core operation. Callers are expected
/// to branch on the variant, not on the message text.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid booking request: {0}")]
    Validation(String),

    #[error("no authenticated user")]
    Authentication,

    #[error("insufficient permissions: {0}")]
    Authorization(String),

    #[error("booking not found: {0}")]
    NotFound(Uuid),

    #[error("transition not allowed: {0}")]
    InvalidTransition(String),

    #[error("slot {time} on {date} already has an accepted booking")]
    Conflict { date: NaiveDate, time: String },

    #[error("store failure: {0}")]
    Store(String),
}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Store(err.to_string())
    }
}
