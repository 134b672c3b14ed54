//! # Reservations Testing
//!
//! Testing utilities and helpers for the reservations services.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - Fixtures for domain drafts and inbound JSON representations
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use reservations_testing::{fixtures, test_clock};
//!
//! #[tokio::test]
//! async fn creates_pending_booking() {
//!     let service = BookingService::new(
//!         Arc::new(InMemoryBookingRepository::new()),
//!         Arc::new(test_clock()),
//!     );
//!     let booking = service.create(fixtures::booking_draft(42)).await?;
//!     assert_eq!(booking.status, BookingStatus::Pending);
//! }
//! ```

use chrono::{DateTime, Utc};
use reservations_core::environment::Clock;

/// Deterministic implementations of Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use reservations_testing::mocks::FixedClock;
    /// use reservations_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Domain drafts and inbound representations.
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};
    use reservations_core::booking::NewBooking;
    use reservations_core::customer::{CustomerId, NewCustomer};
    use serde_json::{Value, json};

    /// Start of the reservation window used by every booking fixture.
    pub const START_DATE: &str = "2025-03-01T14:00:00Z";

    /// End of the reservation window used by every booking fixture.
    pub const END_DATE: &str = "2025-03-04T11:00:00Z";

    #[allow(clippy::expect_used)]
    fn parse(timestamp: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(timestamp)
            .expect("fixture timestamp should always parse")
            .with_timezone(&Utc)
    }

    /// A valid booking draft for `customer_id`.
    #[must_use]
    pub fn booking_draft(customer_id: i64) -> NewBooking {
        NewBooking {
            customer_id: CustomerId::new(customer_id),
            resource: "room-101".to_string(),
            start_date: parse(START_DATE),
            end_date: parse(END_DATE),
            guests: 2,
            notes: None,
        }
    }

    /// A valid booking draft starting `offset_days` after the default window.
    #[must_use]
    pub fn booking_draft_at(customer_id: i64, offset_days: i64) -> NewBooking {
        let mut draft = booking_draft(customer_id);
        draft.start_date += Duration::days(offset_days);
        draft.end_date += Duration::days(offset_days);
        draft
    }

    /// The JSON body a client posts to create a booking.
    #[must_use]
    pub fn booking_json(customer_id: i64) -> Value {
        json!({
            "customerId": customer_id,
            "resource": "room-101",
            "startDate": START_DATE,
            "endDate": END_DATE,
            "guests": 2,
            "notes": "late arrival"
        })
    }

    /// A valid customer draft.
    #[must_use]
    pub fn customer_draft(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    /// The JSON body a client posts to register a customer.
    #[must_use]
    pub fn customer_json(email: &str) -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": email
        })
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use proptest::prelude::*;
    use reservations_core::booking::{BookingStatus, MAX_GUESTS, NewBooking};
    use reservations_core::customer::CustomerId;

    /// Any booking status.
    pub fn any_status() -> impl Strategy<Value = BookingStatus> {
        prop::sample::select(BookingStatus::ALL.to_vec())
    }

    /// Positive customer ids.
    pub fn customer_id() -> impl Strategy<Value = i64> {
        1..10_000_i64
    }

    /// Drafts that satisfy every booking constraint.
    pub fn valid_booking_draft() -> impl Strategy<Value = NewBooking> {
        (
            customer_id(),
            "[a-z]{1,12}-[0-9]{1,4}",
            0..365_i64,
            1..30_i64,
            1..=MAX_GUESTS,
        )
            .prop_map(|(customer_id, resource, offset, nights, guests)| {
                let mut draft = super::fixtures::booking_draft_at(customer_id, offset);
                draft.customer_id = CustomerId::new(customer_id);
                draft.resource = resource;
                draft.end_date = draft.start_date + chrono::Duration::days(nights);
                draft.guests = guests;
                draft
            })
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Safe to call from every test: only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
