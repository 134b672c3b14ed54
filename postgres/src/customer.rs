//! `customers` table access.

use crate::{ping, repository_error};
use chrono::{DateTime, Utc};
use reservations_core::customer::{Customer, CustomerId, NewCustomer};
use reservations_core::repository::{CustomerRepository, RepositoryFuture};
use reservations_core::RepositoryError;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// `PostgreSQL`-backed [`CustomerRepository`].
///
/// Email uniqueness is enforced by the `customers_email_key` constraint, so two
/// concurrent registrations with the same address cannot both succeed.
#[derive(Clone, Debug)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: &PgRow) -> Result<Customer, RepositoryError> {
        Ok(Customer {
            id: CustomerId::new(row.try_get("id").map_err(repository_error)?),
            name: row.try_get("name").map_err(repository_error)?,
            email: row.try_get("email").map_err(repository_error)?,
            created_at: row.try_get("created_at").map_err(repository_error)?,
        })
    }
}

impl CustomerRepository for PostgresCustomerRepository {
    fn insert(
        &self,
        customer: NewCustomer,
        created_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Customer> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                INSERT INTO customers (name, email, created_at)
                VALUES ($1, $2, $3)
                RETURNING id, name, email, created_at
                ",
            )
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)?;

            Self::row_to_customer(&row)
        })
    }

    fn find_by_id(&self, id: CustomerId) -> RepositoryFuture<'_, Option<Customer>> {
        Box::pin(async move {
            let row = sqlx::query("SELECT id, name, email, created_at FROM customers WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(repository_error)?;

            row.as_ref().map(Self::row_to_customer).transpose()
        })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(ping(&self.pool))
    }
}
