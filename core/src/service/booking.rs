//! Booking service: creation, lookups and the status lifecycle.

use crate::booking::{Booking, BookingId, BookingStatus, NewBooking};
use crate::customer::CustomerId;
use crate::environment::Clock;
use crate::error::{Result, ServiceError};
use crate::repository::BookingRepository;
use crate::validation::Validate;
use std::sync::Arc;

/// Resource name used in not-found errors.
pub const BOOKING_RESOURCE: &str = "Booking";

/// Owns the booking status-transition rules.
///
/// # Example
///
/// ```
/// use reservations_core::environment::SystemClock;
/// use reservations_core::memory::InMemoryBookingRepository;
/// use reservations_core::service::BookingService;
/// use std::sync::Arc;
///
/// let service = BookingService::new(
///     Arc::new(InMemoryBookingRepository::new()),
///     Arc::new(SystemClock),
/// );
/// # let _ = service;
/// ```
#[derive(Clone)]
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    /// Wire the service to its repository and clock.
    #[must_use]
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Validate and persist a new booking in `PENDING` status.
    ///
    /// # Errors
    ///
    /// - `Validation`: the draft violates field constraints
    /// - `Repository`: storage failure
    pub async fn create(&self, booking: NewBooking) -> Result<Booking> {
        booking.validate()?;

        let booking = self.repository.insert(booking, self.clock.now()).await?;

        tracing::info!(
            booking_id = %booking.id,
            customer_id = %booking.customer_id,
            resource = %booking.resource,
            "Booking created"
        );
        metrics::counter!("bookings.created").increment(1);

        Ok(booking)
    }

    /// Load a booking.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no booking with this id
    /// - `Repository`: storage failure
    pub async fn find_by_id(&self, id: BookingId) -> Result<Booking> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(BOOKING_RESOURCE, id))
    }

    /// All bookings owned by a customer, ordered by id.
    ///
    /// An unknown customer yields an empty list; customer existence is owned by
    /// the customer service and not checked here.
    ///
    /// # Errors
    ///
    /// - `Repository`: storage failure
    pub async fn find_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Booking>> {
        let mut bookings = self.repository.find_by_customer_id(customer_id).await?;
        bookings.sort_by_key(|booking| booking.id);
        Ok(bookings)
    }

    /// Move a booking to `status`.
    ///
    /// Re-applying the current status succeeds without writing. Otherwise the
    /// transition must be permitted by [`BookingStatus::can_transition_to`] and
    /// is written with a compare-and-set on the status that was loaded.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no booking with this id
    /// - `InvalidTransition`: the lifecycle forbids the change
    /// - `ConcurrentModification`: the status changed between load and write
    /// - `Repository`: storage failure
    pub async fn update_status(&self, id: BookingId, status: BookingStatus) -> Result<Booking> {
        let current = self.find_by_id(id).await?;

        if current.status == status {
            tracing::debug!(booking_id = %id, %status, "Booking already in requested status");
            return Ok(current);
        }

        if !current.status.can_transition_to(status) {
            tracing::warn!(
                booking_id = %id,
                from = %current.status,
                to = %status,
                "Rejected booking status transition"
            );
            metrics::counter!("bookings.transition_rejected").increment(1);
            return Err(ServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .repository
            .update_status(id, current.status, status, self.clock.now())
            .await?;

        let Some(updated) = updated else {
            // The row vanished or moved on since it was loaded.
            return match self.repository.find_by_id(id).await? {
                Some(_) => Err(ServiceError::ConcurrentModification { id }),
                None => Err(ServiceError::not_found(BOOKING_RESOURCE, id)),
            };
        };

        tracing::info!(
            booking_id = %id,
            from = %current.status,
            to = %status,
            "Booking status changed"
        );
        metrics::counter!(
            "bookings.status_changed",
            "from" => current.status.as_str(),
            "to" => status.as_str()
        )
        .increment(1);

        Ok(updated)
    }

    /// Check that the repository is reachable.
    ///
    /// # Errors
    ///
    /// - `Repository`: storage unreachable
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await.map_err(ServiceError::from)
    }
}
