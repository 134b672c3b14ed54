//! Helpers shared by resource handlers.
//!
//! Path parameters arrive as raw strings and are parsed here, so a malformed id
//! becomes a `422 VALIDATION_ERROR` naming the parameter rather than axum's
//! plain-text path rejection.

use crate::error::AppError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use reservations_core::{Booking, BookingStatus, Customer, ValidationErrors};
use serde::Serialize;
use std::fmt::Display;

/// A representation that is addressable under its collection path.
pub trait Resource: Serialize {
    /// Name used in log lines.
    const NAME: &'static str;

    /// Identifier type appended to the collection path.
    type Id: Display;

    /// The identifier of this instance.
    fn id(&self) -> Self::Id;
}

impl Resource for Booking {
    const NAME: &'static str = "booking";
    type Id = i64;

    fn id(&self) -> i64 {
        self.id.value()
    }
}

impl Resource for Customer {
    const NAME: &'static str = "customer";
    type Id = i64;

    fn id(&self) -> i64 {
        self.id.value()
    }
}

/// `201 Created` with a `Location: {base}/{id}` header and the stored representation.
///
/// `base` is the collection path without a trailing slash; the services mount
/// their collections at the root, so they pass `""`.
#[must_use]
pub fn created<R: Resource>(base: &str, resource: &R) -> Response {
    let location = format!("{base}/{}", resource.id());
    tracing::debug!(resource = R::NAME, %location, "Resource created");

    let mut response = (StatusCode::CREATED, Json(resource)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Parse a positive numeric identifier from a path segment.
///
/// # Errors
///
/// Returns a validation error naming `field` when `raw` is not a positive integer.
pub fn parse_id(raw: &str, field: &'static str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation(ValidationErrors::single(
            field,
            format!("must be a positive integer, got '{raw}'"),
        ))),
    }
}

/// Parse a booking status from a path segment.
///
/// # Errors
///
/// Returns a validation error on `status` when the value is not a known status.
pub fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    raw.parse::<BookingStatus>().map_err(|e| {
        AppError::validation(ValidationErrors::single("status", e.to_string()))
    })
}
