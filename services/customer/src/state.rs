//! Shared handler state.

use reservations_core::CustomerRepository;
use reservations_core::environment::{Clock, SystemClock};
use reservations_core::memory::InMemoryCustomerRepository;
use reservations_core::service::CustomerService;
use reservations_postgres::{PoolSettings, PostgresCustomerRepository, PostgresError};
use reservations_web::config::DatabaseConfig;
use std::sync::Arc;

/// State handed to every customer handler.
#[derive(Clone)]
pub struct CustomerState {
    /// Customer registration service
    pub customers: CustomerService,
}

impl CustomerState {
    /// Wrap an already wired service.
    #[must_use]
    pub const fn new(customers: CustomerService) -> Self {
        Self { customers }
    }

    /// State backed by the in-memory repository.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(CustomerService::new(
            Arc::new(InMemoryCustomerRepository::new()),
            clock,
        ))
    }

    /// Build state from configuration, connecting and migrating when a
    /// database is configured.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresError`] if the database is unreachable or a
    /// migration fails.
    pub async fn from_config(database: Option<&DatabaseConfig>) -> Result<Self, PostgresError> {
        let repository: Arc<dyn CustomerRepository> = match database {
            Some(database) => {
                let settings = PoolSettings {
                    max_connections: database.max_connections,
                    connect_timeout: database.connect_timeout(),
                };
                let pool = reservations_postgres::connect(&database.url, &settings).await?;
                reservations_postgres::migrate(&pool).await?;
                Arc::new(PostgresCustomerRepository::new(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, customers are kept in memory");
                Arc::new(InMemoryCustomerRepository::new())
            }
        };

        Ok(Self::new(CustomerService::new(repository, Arc::new(SystemClock))))
    }
}
