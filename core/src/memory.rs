//! In-memory repositories.
//!
//! Used when no database is configured and as fast, deterministic storage in
//! tests. Ids come from a per-repository sequence starting at 1. Id assignment,
//! uniqueness checks and compare-and-set writes all happen under one write lock.

use crate::booking::{Booking, BookingId, BookingStatus, NewBooking};
use crate::customer::{Customer, CustomerId, NewCustomer};
use crate::error::RepositoryError;
use crate::repository::{BookingRepository, CustomerRepository, RepositoryFuture};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Database("in-memory store lock poisoned".to_string())
}

#[derive(Debug, Default)]
struct BookingTable {
    next_id: i64,
    rows: BTreeMap<BookingId, Booking>,
}

/// `BTreeMap`-backed booking storage.
///
/// # Example
///
/// ```
/// use reservations_core::memory::InMemoryBookingRepository;
///
/// let repository = InMemoryBookingRepository::new();
/// assert!(repository.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryBookingRepository {
    table: Arc<RwLock<BookingTable>>,
}

impl InMemoryBookingRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().map_or(0, |table| table.rows.len())
    }

    /// Whether no booking is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(
        &self,
        booking: NewBooking,
        created_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Booking> {
        Box::pin(async move {
            let mut table = self.table.write().map_err(poisoned)?;
            table.next_id += 1;
            let id = BookingId::new(table.next_id);
            let booking = Booking::from_new(id, booking, created_at);
            table.rows.insert(id, booking.clone());
            Ok(booking)
        })
    }

    fn find_by_id(&self, id: BookingId) -> RepositoryFuture<'_, Option<Booking>> {
        Box::pin(async move {
            let table = self.table.read().map_err(poisoned)?;
            Ok(table.rows.get(&id).cloned())
        })
    }

    fn find_by_customer_id(&self, customer_id: CustomerId) -> RepositoryFuture<'_, Vec<Booking>> {
        Box::pin(async move {
            let table = self.table.read().map_err(poisoned)?;
            Ok(table
                .rows
                .values()
                .filter(|booking| booking.customer_id == customer_id)
                .cloned()
                .collect())
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
            let mut table = self.table.write().map_err(poisoned)?;
            Ok(table
                .rows
                .get_mut(&id)
                .filter(|booking| booking.status == expected)
                .map(|booking| {
                    booking.status = status;
                    booking.updated_at = updated_at;
                    booking.clone()
                }))
        })
    }
}

#[derive(Debug, Default)]
struct CustomerTable {
    next_id: i64,
    rows: BTreeMap<CustomerId, Customer>,
    by_email: HashMap<String, CustomerId>,
}

/// `BTreeMap`-backed customer storage with a unique email index.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<RwLock<CustomerTable>>,
}

impl InMemoryCustomerRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().map_or(0, |table| table.rows.len())
    }

    /// Whether no customer is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn insert(
        &self,
        customer: NewCustomer,
        created_at: DateTime<Utc>,
    ) -> RepositoryFuture<'_, Customer> {
        Box::pin(async move {
            let mut table = self.table.write().map_err(poisoned)?;
            if table.by_email.contains_key(&customer.email) {
                return Err(RepositoryError::UniqueViolation {
                    constraint: "customers_email_key".to_string(),
                });
            }
            table.next_id += 1;
            let id = CustomerId::new(table.next_id);
            table.by_email.insert(customer.email.clone(), id);
            let customer = Customer::from_new(id, customer, created_at);
            table.rows.insert(id, customer.clone());
            Ok(customer)
        })
    }

    fn find_by_id(&self, id: CustomerId) -> RepositoryFuture<'_, Option<Customer>> {
        Box::pin(async move {
            let table = self.table.read().map_err(poisoned)?;
            Ok(table.rows.get(&id).cloned())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn draft(customer_id: i64) -> NewBooking {
        NewBooking {
            customer_id: CustomerId::new(customer_id),
            resource: "room-101".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 3, 1, 14, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 3, 4, 11, 0, 0).unwrap(),
            guests: 2,
            notes: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let repository = InMemoryBookingRepository::new();
        let first = repository.insert(draft(1), now()).await.unwrap();
        let second = repository.insert(draft(1), now()).await.unwrap();
        assert_eq!(first.id, BookingId::new(1));
        assert_eq!(second.id, BookingId::new(2));
        assert_eq!(repository.len(), 2);
    }

    #[tokio::test]
    async fn find_by_customer_id_filters() {
        let repository = InMemoryBookingRepository::new();
        repository.insert(draft(42), now()).await.unwrap();
        repository.insert(draft(7), now()).await.unwrap();
        repository.insert(draft(42), now()).await.unwrap();

        let bookings = repository
            .find_by_customer_id(CustomerId::new(42))
            .await
            .unwrap();
        let ids: Vec<_> = bookings.iter().map(|b| b.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn update_status_requires_expected_status() {
        let repository = InMemoryBookingRepository::new();
        let booking = repository.insert(draft(1), now()).await.unwrap();

        let stale = repository
            .update_status(booking.id, BookingStatus::Confirmed, BookingStatus::Cancelled, now())
            .await
            .unwrap();
        assert!(stale.is_none());

        let updated = repository
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed, now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn update_status_of_missing_booking_is_none() {
        let repository = InMemoryBookingRepository::new();
        let result = repository
            .update_status(BookingId::new(9), BookingStatus::Pending, BookingStatus::Confirmed, now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let repository = InMemoryCustomerRepository::new();
        let customer = NewCustomer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        repository.insert(customer.clone(), now()).await.unwrap();
        let err = repository.insert(customer, now()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueViolation { .. }));
        assert_eq!(repository.len(), 1);
    }
}
