//! `bookings` table access.

use crate::{ping, repository_error};
use chrono::{DateTime, Utc};
use reservations_core::booking::{Booking, BookingId, BookingStatus, NewBooking};
use reservations_core::customer::CustomerId;
use reservations_core::repository::{BookingRepository, RepositoryFuture};
use reservations_core::RepositoryError;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, customer_id, status, resource, start_date, end_date, guests, notes, created_at, updated_at";

/// `PostgreSQL`-backed [`BookingRepository`].
///
/// Ids come from a `BIGSERIAL` column. Status writes use
/// `UPDATE ... WHERE id = $1 AND status = $2`, so a concurrent writer that got
/// there first makes the update match no row.
#[derive(Clone, Debug)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &PgRow) -> Result<Booking, RepositoryError> {
        let status: String = row.try_get("status").map_err(repository_error)?;
        let status = status
            .parse::<BookingStatus>()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        let guests: i32 = row.try_get("guests").map_err(repository_error)?;
        let guests = u32::try_from(guests)
            .map_err(|_| RepositoryError::Database(format!("Invalid guest count: {guests}")))?;

        Ok(Booking {
            id: BookingId::new(row.try_get("id").map_err(repository_error)?),
            customer_id: CustomerId::new(row.try_get("customer_id").map_err(repository_error)?),
            status,
            resource: row.try_get("resource").map_err(repository_error)?,
            start_date: row.try_get("start_date").map_err(repository_error)?,
            end_date: row.try_get("end_date").map_err(repository_error)?,
            guests,
            notes: row.try_get("notes").map_err(repository_error)?,
            created_at: row.try_get("created_at").map_err(repository_error)?,
            updated_at: row.try_get("updated_at").map_err(repository_error)?,
        })
    }
}

impl BookingRepository for PostgresBookingRepository {
    fn insert(
        &self,
        booking: NewBooking,
        created_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Booking> {
        Box::pin(async move {
            let guests = i32::try_from(booking.guests).map_err(|_| {
                RepositoryError::Database(format!("Guest count out of range: {}", booking.guests))
            })?;

            let row = sqlx::query(&format!(
                r"
                INSERT INTO bookings (
                    customer_id, status, resource, start_date, end_date,
                    guests, notes, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                RETURNING {COLUMNS}
                "
            ))
            .bind(booking.customer_id.value())
            .bind(BookingStatus::Pending.as_str())
            .bind(&booking.resource)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(guests)
            .bind(&booking.notes)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)?;

            Self::row_to_booking(&row)
        })
    }

    fn find_by_id(&self, id: BookingId) -> RepositoryFuture<'_, Option<Booking>> {
        Box::pin(async move {
            let row = sqlx::query(&format!("SELECT {COLUMNS} FROM bookings WHERE id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(repository_error)?;

            row.as_ref().map(Self::row_to_booking).transpose()
        })
    }

    fn find_by_customer_id(&self, customer_id: CustomerId) -> RepositoryFuture<'_, Vec<Booking>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!(
                "SELECT {COLUMNS} FROM bookings WHERE customer_id = $1 ORDER BY id ASC"
            ))
            .bind(customer_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

            rows.iter().map(Self::row_to_booking).collect()
        })
    }

    fn update_status(
        &self,
        id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Option<Booking>> {
        Box::pin(async move {
            let row = sqlx::query(&format!(
                r"
                UPDATE bookings
                SET status = $3, updated_at = $4
                WHERE id = $1 AND status = $2
                RETURNING {COLUMNS}
                "
            ))
            .bind(id.value())
            .bind(expected.as_str())
            .bind(status.as_str())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

            row.as_ref().map(Self::row_to_booking).transpose()
        })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(ping(&self.pool))
    }
}
