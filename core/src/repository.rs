//! Persistence seams for bookings and customers.
//!
//! # Implementations
//!
//! - `InMemoryBookingRepository` / `InMemoryCustomerRepository` (in
//!   [`crate::memory`]): default storage and test double
//! - `PostgresBookingRepository` / `PostgresCustomerRepository` (in
//!   `reservations-postgres`): production storage
//!
//! # Dyn Compatibility
//!
//! These traits return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! services can hold them as `Arc<dyn BookingRepository>` and pick the backend
//! at startup.

use crate::booking::{Booking, BookingId, BookingStatus, NewBooking};
use crate::customer::{Customer, CustomerId, NewCustomer};
use crate::error::RepositoryError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by repository methods.
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Storage for bookings, keyed by booking id and by customer id.
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking in `PENDING` status and assign its id.
    ///
    /// # Errors
    ///
    /// - `Database`: storage failure
    fn insert(&self, booking: NewBooking, created_at: DateTime<Utc>)
    -> RepositoryFuture<'_, Booking>;

    /// Load a booking by id. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// - `Database`: storage failure
    fn find_by_id(&self, id: BookingId) -> RepositoryFuture<'_, Option<Booking>>;

    /// Load every booking owned by `customer_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// - `Database`: storage failure
    fn find_by_customer_id(&self, customer_id: CustomerId) -> RepositoryFuture<'_, Vec<Booking>>;

    /// Compare-and-set the status of a booking.
    ///
    /// The write only happens when the stored status still equals `expected`.
    /// Returns the updated booking, or `None` when no booking with that id and
    /// status exists.
    ///
    /// # Errors
    ///
    /// - `Database`: storage failure
    fn update_status(
        &self,
        id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Option<Booking>>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// - `Database`: storage unreachable
    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Storage for customers. Email addresses are unique.
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer and assign its id.
    ///
    /// # Errors
    ///
    /// - `UniqueViolation`: another customer already uses the email
    /// - `Database`: storage failure
    fn insert(
        &self,
        customer: NewCustomer,
        created_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Customer>;

    /// Load a customer by id. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// - `Database`: storage failure
    fn find_by_id(&self, id: CustomerId) -> RepositoryFuture<'_, Option<Customer>>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// - `Database`: storage unreachable
    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
