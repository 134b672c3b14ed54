//! # Reservations Core
//!
//! Domain types, repositories and services for the booking and customer
//! resources.
//!
//! ## Core Concepts
//!
//! - **Booking**: a reservation owned by one customer, with a status lifecycle
//! - **Customer**: the owner of bookings, unique by email
//! - **Repository**: persistence seam, injected as `Arc<dyn ...Repository>`
//! - **Service**: the only place holding decision logic (status transitions,
//!   uniqueness outcomes)
//! - **Environment**: injected dependencies such as the [`environment::Clock`]
//!
//! ## Example
//!
//! ```
//! use reservations_core::booking::{BookingStatus, NewBooking};
//! use reservations_core::customer::CustomerId;
//! use reservations_core::environment::SystemClock;
//! use reservations_core::memory::InMemoryBookingRepository;
//! use reservations_core::service::BookingService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), reservations_core::ServiceError> {
//! let service = BookingService::new(
//!     Arc::new(InMemoryBookingRepository::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! let booking = service
//!     .create(NewBooking {
//!         customer_id: CustomerId::new(42),
//!         resource: "room-101".to_string(),
//!         start_date: "2025-03-01T14:00:00Z".parse().unwrap_or_default(),
//!         end_date: "2025-03-04T11:00:00Z".parse().unwrap_or_default(),
//!         guests: 2,
//!         notes: None,
//!     })
//!     .await?;
//!
//! service.update_status(booking.id, BookingStatus::Confirmed).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod booking;
pub mod customer;
pub mod environment;
pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export key types for convenience
pub use booking::{Booking, BookingId, BookingStatus, NewBooking};
pub use customer::{Customer, CustomerId, NewCustomer};
pub use error::{RepositoryError, ServiceError};
pub use repository::{BookingRepository, CustomerRepository};
pub use service::{BookingService, CustomerService};
pub use validation::{FieldError, Validate, ValidationErrors};
