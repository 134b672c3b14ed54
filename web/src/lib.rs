//! Axum plumbing shared by the booking and customer services.
//!
//! The services keep their routes and handlers; this crate holds everything
//! around them:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        HTTP shell (this crate)          │  ← config, tracing, metrics
//! │  - Correlation ids, request tracing     │  ← error format, extractors
//! │  - Graceful shutdown                    │
//! ├─────────────────────────────────────────┤
//! │        Service handlers                 │  ← parse, call, map result
//! ├─────────────────────────────────────────┤
//! │        reservations-core                │  ← validation, transitions
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives and gets a correlation id
//! 2. **Extract** path segments and the JSON body
//! 3. **Call** the domain service
//! 4. **Map** the result (or [`ServiceError`](reservations_core::ServiceError)) to a response
//!
//! # Example
//!
//! ```ignore
//! use reservations_web::{AppError, JsonBody, resource};
//!
//! async fn save(
//!     State(state): State<CustomerState>,
//!     JsonBody(request): JsonBody<NewCustomer>,
//! ) -> Result<Response, AppError> {
//!     let customer = state.customers.create(request).await?;
//!     Ok(resource::created("", &customer))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod resource;
pub mod server;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use error::AppError;
pub use extractors::{CorrelationId, JsonBody};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationIdExt, instrument, track_correlation_id};
pub use server::ServerError;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
