//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request correlation id, from the middleware or the header
//! - `JsonBody`: `Json<T>` whose rejections render as [`AppError`]
//!
//! # Examples
//!
//! ```ignore
//! use reservations_web::extractors::{CorrelationId, JsonBody};
//!
//! async fn handler(
//!     correlation_id: CorrelationId,
//!     JsonBody(request): JsonBody<BookingRequest>,
//! ) -> Result<Json<Booking>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Creating booking");
//!     ...
//! }
//! ```

use crate::error::AppError;
use crate::middleware::header_correlation_id;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the id stored by [`crate::middleware::track_correlation_id`], falls
/// back to the `X-Correlation-ID` header, and finally generates a new UUID v4.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .or_else(|| header_correlation_id(&parts.headers))
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// JSON request body.
///
/// Behaves like `axum::Json` but malformed or missing bodies are rejected with
/// a `400 BAD_REQUEST` [`AppError`] in the common error format.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
