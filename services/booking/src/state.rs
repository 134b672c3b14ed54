//! Shared handler state.

use reservations_core::BookingRepository;
use reservations_core::environment::{Clock, SystemClock};
use reservations_core::memory::InMemoryBookingRepository;
use reservations_core::service::BookingService;
use reservations_postgres::{PoolSettings, PostgresBookingRepository, PostgresError};
use reservations_web::config::DatabaseConfig;
use std::sync::Arc;

/// State handed to every booking handler.
#[derive(Clone)]
pub struct BookingState {
    /// Booking lifecycle service
    pub bookings: BookingService,
}

impl BookingState {
    /// Wrap an already wired service.
    #[must_use]
    pub const fn new(bookings: BookingService) -> Self {
        Self { bookings }
    }

    /// State backed by the in-memory repository.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(BookingService::new(
            Arc::new(InMemoryBookingRepository::new()),
            clock,
        ))
    }

    /// Build state from configuration.
    ///
    /// With a database configured the pool is opened and migrated; otherwise
    /// bookings live in memory for the lifetime of the process.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresError`] if the database is unreachable or a
    /// migration fails.
    pub async fn from_config(database: Option<&DatabaseConfig>) -> Result<Self, PostgresError> {
        let repository: Arc<dyn BookingRepository> = match database {
            Some(database) => {
                let settings = PoolSettings {
                    max_connections: database.max_connections,
                    connect_timeout: database.connect_timeout(),
                };
                let pool = reservations_postgres::connect(&database.url, &settings).await?;
                reservations_postgres::migrate(&pool).await?;
                Arc::new(PostgresBookingRepository::new(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, bookings are kept in memory");
                Arc::new(InMemoryBookingRepository::new())
            }
        };

        Ok(Self::new(BookingService::new(repository, Arc::new(SystemClock))))
    }
}
