//! Customer service: registration with a unique email and lookup by id.

use crate::customer::{Customer, CustomerId, NewCustomer};
use crate::environment::Clock;
use crate::error::{Result, ServiceError};
use crate::repository::CustomerRepository;
use crate::validation::Validate;
use std::sync::Arc;

/// Resource name used in not-found errors.
pub const CUSTOMER_RESOURCE: &str = "Customer";

/// Registers and loads customers.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
    clock: Arc<dyn Clock>,
}

impl CustomerService {
    /// Wire the service to its repository and clock.
    #[must_use]
    pub fn new(repository: Arc<dyn CustomerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Validate, normalise and persist a new customer.
    ///
    /// # Errors
    ///
    /// - `Validation`: the draft violates field constraints
    /// - `ResourceAlreadyExists`: another customer uses the same email
    /// - `Repository`: storage failure
    pub async fn create(&self, customer: NewCustomer) -> Result<Customer> {
        customer.validate()?;
        let customer = customer.normalized();

        let customer = match self.repository.insert(customer, self.clock.now()).await {
            Ok(customer) => customer,
            Err(err) => {
                let err = ServiceError::from(err);
                if err == ServiceError::ResourceAlreadyExists {
                    tracing::info!("Rejected customer with duplicate email");
                    metrics::counter!("customers.duplicate_rejected").increment(1);
                }
                return Err(err);
            }
        };

        tracing::info!(customer_id = %customer.id, "Customer created");
        metrics::counter!("customers.created").increment(1);

        Ok(customer)
    }

    /// Load a customer.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no customer with this id
    /// - `Repository`: storage failure
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(CUSTOMER_RESOURCE, id))
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCustomerRepository;
    use chrono::{DateTime, TimeZone, Utc};

    struct StoppedClock;

    impl Clock for StoppedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        }
    }

    fn draft(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_leaves_one_customer() {
        let repository = InMemoryCustomerRepository::new();
        let service = CustomerService::new(Arc::new(repository.clone()), Arc::new(StoppedClock));

        let first = service.create(draft("ada@example.com")).await.unwrap();
        assert_eq!(first.id, CustomerId::new(1));

        let err = service.create(draft("ADA@example.com")).await.unwrap_err();
        assert_eq!(err, ServiceError::ResourceAlreadyExists);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn email_is_stored_lower_case() {
        let service = CustomerService::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(StoppedClock),
        );
        let customer = service.create(draft("Ada@Example.com")).await.unwrap();
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(service.find_by_id(customer.id).await.unwrap(), customer);
    }

    #[tokio::test]
    async fn invalid_customer_is_not_stored() {
        let repository = InMemoryCustomerRepository::new();
        let service = CustomerService::new(Arc::new(repository.clone()), Arc::new(StoppedClock));
        let err = service.create(draft("not-an-email")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let service = CustomerService::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(StoppedClock),
        );
        let err = service.find_by_id(CustomerId::new(3)).await.unwrap_err();
        assert_eq!(err, ServiceError::not_found("Customer", 3));
    }
}
