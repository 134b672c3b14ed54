//! Booking endpoints.
//!
//! - `GET /customer/:id` - bookings owned by a customer
//! - `GET /:id` - one booking
//! - `POST /` - create a booking
//! - `PUT /:id/status/:status` - move a booking through its lifecycle

use crate::dto::BookingRequest;
use crate::state::BookingState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reservations_core::{Booking, BookingId, CustomerId};
use reservations_web::handlers::readiness;
use reservations_web::resource::{self, parse_id, parse_status};
use reservations_web::{AppError, CorrelationId, JsonBody};

/// Fetch a booking.
///
/// ```bash
/// curl http://localhost:8080/1
/// ```
///
/// # Errors
///
/// - 422 if `id` is not a positive integer
/// - 404 if no booking has this id
pub async fn get(
    State(state): State<BookingState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = BookingId::new(parse_id(&id, "id")?);
    let booking = state.bookings.find_by_id(id).await?;
    Ok(Json(booking))
}

/// List the bookings of a customer, oldest first.
///
/// An unknown customer yields `[]`.
///
/// # Errors
///
/// - 422 if `id` is not a positive integer
pub async fn get_by_customer_id(
    State(state): State<BookingState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let customer_id = CustomerId::new(parse_id(&id, "customerId")?);
    let bookings = state.bookings.find_by_customer_id(customer_id).await?;
    Ok(Json(bookings))
}

/// Create a booking.
///
/// ```bash
/// curl -X POST http://localhost:8080/ \
///   -H "Content-Type: application/json" \
///   -d '{"customerId":42,"resource":"room-101","startDate":"2025-03-01T14:00:00Z",
///        "endDate":"2025-03-04T11:00:00Z","guests":2}'
/// ```
///
/// Responds `201 Created` with `Location: /{id}` and the stored booking.
///
/// # Errors
///
/// - 400 if the body is not JSON
/// - 422 listing every offending field
pub async fn save(
    State(state): State<BookingState>,
    correlation_id: CorrelationId,
    JsonBody(request): JsonBody<BookingRequest>,
) -> Result<Response, AppError> {
    let draft = request.into_new_booking().map_err(AppError::validation)?;
    let booking = state.bookings.create(draft).await?;

    tracing::debug!(
        correlation_id = %correlation_id.0,
        booking_id = %booking.id,
        "Booking saved"
    );

    Ok(resource::created("", &booking))
}

/// Move a booking to another status.
///
/// Responds `204 No Content`; re-applying the current status also succeeds.
///
/// # Errors
///
/// - 422 if `id` or `status` does not parse
/// - 404 if no booking has this id
/// - 409 if the lifecycle forbids the change or another request won the race
pub async fn update_status(
    State(state): State<BookingState>,
    Path((id, status)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = BookingId::new(parse_id(&id, "id")?);
    let status = parse_status(&status)?;

    state.bookings.update_status(id, status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Readiness check: 200 when the repository answers, 503 otherwise.
pub async fn ready(State(state): State<BookingState>) -> impl IntoResponse {
    readiness(state.bookings.ping().await)
}
