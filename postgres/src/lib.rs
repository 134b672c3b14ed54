//! `PostgreSQL` repositories for the reservations services.
//!
//! This crate implements the repository traits from `reservations-core` on top
//! of sqlx and supports:
//!
//! - Connection pooling
//! - Embedded schema migrations
//! - Unique-constraint detection (mapped to `RepositoryError::UniqueViolation`)
//! - Compare-and-set status updates
//!
//! # Example
//!
//! ```no_run
//! use reservations_postgres::{connect, migrate, PoolSettings, PostgresBookingRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect("postgres://localhost/bookings", &PoolSettings::default()).await?;
//! migrate(&pool).await?;
//! let bookings = PostgresBookingRepository::new(pool);
//! # let _ = bookings;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod booking;
mod customer;

pub use booking::PostgresBookingRepository;
pub use customer::PostgresCustomerRepository;

use reservations_core::RepositoryError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while preparing the database.
#[derive(Error, Debug)]
pub enum PostgresError {
    /// The pool could not connect.
    #[error("Failed to connect to PostgreSQL: {0}")]
    Connect(#[source] sqlx::Error),

    /// A migration failed to apply.
    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connection pool tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long to wait for a connection before failing
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Open a connection pool.
///
/// # Errors
///
/// Returns [`PostgresError::Connect`] if the database is unreachable.
pub async fn connect(url: &str, settings: &PoolSettings) -> Result<PgPool, PostgresError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect(url)
        .await
        .map_err(PostgresError::Connect)?;

    tracing::info!(
        max_connections = settings.max_connections,
        "PostgreSQL pool connected"
    );

    Ok(pool)
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns [`PostgresError::Migrate`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), PostgresError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("PostgreSQL migrations applied");
    Ok(())
}

/// Translate a sqlx error into the repository error vocabulary.
pub(crate) fn repository_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepositoryError::UniqueViolation {
                constraint: db.constraint().unwrap_or("unique").to_string(),
            };
        }
    }
    metrics::counter!("repository.database_errors").increment(1);
    RepositoryError::Database(err.to_string())
}

pub(crate) async fn ping(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(repository_error)
}
