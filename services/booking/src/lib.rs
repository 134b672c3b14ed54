//! Booking service.
//!
//! Exposes bookings over HTTP:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/customer/:id` | bookings of a customer |
//! | GET | `/:id` | one booking |
//! | POST | `/` | 201 + `Location` |
//! | PUT | `/:id/status/:status` | 204 |
//! | GET | `/health`, `/ready` | liveness and readiness |

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dto;
pub mod handlers;
pub mod state;

pub use state::BookingState;

use axum::{
    Router,
    routing::{get, post, put},
};
use reservations_web::handlers::health_check;
use reservations_web::middleware::instrument;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Build the booking router with tracing and correlation ids applied.
pub fn build_router(state: BookingState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(handlers::ready))
        .route("/", post(handlers::save))
        .route("/customer/:id", get(handlers::get_by_customer_id))
        .route("/:id", get(handlers::get))
        .route("/:id/status/:status", put(handlers::update_status))
        .with_state(state);

    instrument(router)
}
