use crate::decision::{late_cancellation_fee, remaining_decision_seconds};
use crate::error::BookingError;
use crate::store::BookingStore;
use crate::types::{Booking, BookingStatus, BookingType, Role, User};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityQuery {
    date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookRequest {
    #[serde(rename = "type")]
    booking_type: BookingType,
    date: NaiveDate,
    time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpdateStatusRequest {
    id: Uuid,
    status: BookingStatus,
    reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpdateStatusResponse {
    booking: Booking,
    late_cancellation_fee: bool,
}

/// Booking plus the advisory countdown the admin panel renders next to
/// pending requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingView {
    #[serde(flatten)]
    booking: Booking,
    remaining_decision_seconds: Option<i64>,
}

impl BookingView {
    fn at(booking: Booking, now: DateTime<Local>) -> Self {
        let remaining = (booking.status == BookingStatus::Pending)
            .then(|| remaining_decision_seconds(&booking, now));
        Self {
            booking,
            remaining_decision_seconds: remaining,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Authentication => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidTransition(_) => StatusCode::CONFLICT,
            BookingError::Conflict { .. } => StatusCode::CONFLICT,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

pub fn create_app<S: BookingStore>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new().route("/availability", get(get_availability::<S>));

    let admin = Router::new()
        .route("/bookings", get(get_all_bookings::<S>))
        .route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        .route("/book", post(book::<S>))
        .route("/my_bookings", get(get_my_bookings::<S>))
        .route("/update_status", post(update_status::<S>))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<S>,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(cors)
}

/// Resolves the caller's account from the `x-user-email` header, the
/// stand-in for a session token. The core never sees unauthenticated
/// actors; this is where they are turned away.
async fn authenticate<S: BookingStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BookingError> {
    let email = request
        .headers()
        .get("x-user-email")
        .and_then(|value| value.to_str().ok())
        .ok_or(BookingError::Authentication)?
        .to_string();

    let user = state
        .manager
        .users()?
        .into_iter()
        .find(|user| user.email == email)
        .ok_or(BookingError::Authentication)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn require_admin(
    Extension(actor): Extension<User>,
    request: Request,
    next: Next,
) -> Result<Response, BookingError> {
    if actor.role != Role::Admin {
        return Err(BookingError::Authorization("admin role required".into()));
    }
    Ok(next.run(request).await)
}

async fn get_availability<S: BookingStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<String>>, BookingError> {
    Ok(Json(state.manager.available_slots(query.date)?))
}

async fn book<S: BookingStore>(
    State(state): State<AppState<S>>,
    Extension(actor): Extension<User>,
    Json(request): Json<BookRequest>,
) -> Result<Json<Booking>, BookingError> {
    let booking =
        state
            .manager
            .create_booking(&actor, request.booking_type, request.date, &request.time)?;
    Ok(Json(booking))
}

async fn get_my_bookings<S: BookingStore>(
    State(state): State<AppState<S>>,
    Extension(actor): Extension<User>,
) -> Result<Json<Vec<BookingView>>, BookingError> {
    let now = Local::now();
    let bookings = state.manager.user_bookings(&actor.id)?;
    Ok(Json(
        bookings
            .into_iter()
            .map(|booking| BookingView::at(booking, now))
            .collect(),
    ))
}

async fn get_all_bookings<S: BookingStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<BookingView>>, BookingError> {
    let now = Local::now();
    let bookings = state.manager.all_bookings()?;
    Ok(Json(
        bookings
            .into_iter()
            .map(|booking| BookingView::at(booking, now))
            .collect(),
    ))
}

async fn update_status<S: BookingStore>(
    State(state): State<AppState<S>>,
    Extension(actor): Extension<User>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, BookingError> {
    // The fee flag must be computed against the state before the
    // transition, cancellation overwrites the accepted status.
    let fee = match request.status {
        BookingStatus::Cancelled => {
            let booking = state.manager.find_booking(request.id)?;
            late_cancellation_fee(&booking, Local::now())
        }
        _ => false,
    };

    let booking = state
        .manager
        .update_status(request.id, request.status, &actor, request.reason)?;
    Ok(Json(UpdateStatusResponse {
        booking,
        late_cancellation_fee: fee,
    }))
}
