//! Customer endpoints.

use crate::dto::CustomerRequest;
use crate::state::CustomerState;
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use reservations_core::{Customer, CustomerId};
use reservations_web::handlers::readiness;
use reservations_web::resource::{self, parse_id};
use reservations_web::{AppError, JsonBody};

/// Register a customer.
///
/// Responds `201 Created` with `Location: /{id}`.
///
/// # Errors
///
/// - 400 if the body is not JSON
/// - 422 listing every offending field
/// - 409 `RESOURCE_ALREADY_EXISTS` if the email is taken
pub async fn save(
    State(state): State<CustomerState>,
    JsonBody(request): JsonBody<CustomerRequest>,
) -> Result<Response, AppError> {
    let draft = request.into_new_customer().map_err(AppError::validation)?;
    let customer = state.customers.create(draft).await?;
    Ok(resource::created("", &customer))
}

/// Fetch a customer.
///
/// # Errors
///
/// - 422 if `id` is not a positive integer
/// - 404 if no customer has this id
pub async fn get(
    State(state): State<CustomerState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let id = CustomerId::new(parse_id(&id, "id")?);
    Ok(Json(state.customers.find_by_id(id).await?))
}

/// Readiness check.
pub async fn ready(State(state): State<CustomerState>) -> impl IntoResponse {
    readiness(state.customers.ping().await)
}
