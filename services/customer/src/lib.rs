//! Customer service.
//!
//! Registers customers, unique by email, and serves them by id.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dto;
pub mod handlers;
pub mod state;

pub use state::CustomerState;

use axum::{
    Router,
    routing::{get, post},
};
use reservations_web::handlers::health_check;
use reservations_web::middleware::instrument;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8081;

/// Build the customer router with tracing and correlation ids applied.
pub fn build_router(state: CustomerState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(handlers::ready))
        .route("/", post(handlers::save))
        .route("/:id", get(handlers::get))
        .with_state(state);

    instrument(router)
}
