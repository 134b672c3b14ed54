//! Booking domain types.
//!
//! A booking is a reservation of some resource owned by exactly one customer.
//! Its only mutable attribute is [`BookingStatus`], which moves through the
//! lifecycle below via [`BookingStatus::can_transition_to`]:
//!
//! ```text
//! PENDING ──► CONFIRMED ──► COMPLETED
//!    │            │
//!    └──► CANCELLED ◄──┘
//! ```
//!
//! `CANCELLED` and `COMPLETED` are terminal. Re-applying the current status is
//! always accepted so that status updates stay idempotent.

use crate::customer::CustomerId;
use crate::validation::{Validate, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted resource reference.
pub const MAX_RESOURCE_LEN: usize = 255;

/// Longest accepted free-text note.
pub const MAX_NOTES_LEN: usize = 1000;

/// Largest party a single booking may hold.
pub const MAX_GUESTS: u32 = 50;

/// Unique identifier for a booking, assigned by the repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a booking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, awaiting confirmation
    #[default]
    Pending,
    /// Confirmed by the provider
    Confirmed,
    /// Cancelled (terminal)
    Cancelled,
    /// Fulfilled (terminal)
    Completed,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Upper-case wire name, also used as the database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether no further transitions leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether a booking in `self` may move to `next`.
    ///
    /// Self-transitions are always allowed.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Pending | Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Confirmed | Self::Cancelled | Self::Completed)
                | (Self::Cancelled, Self::Cancelled)
                | (Self::Completed, Self::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`BookingStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status '{0}', expected one of PENDING, CONFIRMED, CANCELLED, COMPLETED")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    /// Parses a status name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A persisted booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Repository-assigned identifier
    pub id: BookingId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Current lifecycle state
    pub status: BookingStatus,
    /// Reserved resource reference
    pub resource: String,
    /// Start of the reservation window
    pub start_date: DateTime<Utc>,
    /// End of the reservation window
    pub end_date: DateTime<Utc>,
    /// Party size
    pub guests: u32,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Materialise a new booking from its draft once the repository assigned an id.
    #[must_use]
    pub fn from_new(id: BookingId, new: NewBooking, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id: new.customer_id,
            status: BookingStatus::Pending,
            resource: new.resource,
            start_date: new.start_date,
            end_date: new.end_date,
            guests: new.guests,
            notes: new.notes,
            created_at,
            updated_at: created_at,
        }
    }
}

/// A booking that has not been persisted yet.
///
/// There is no status field: every booking starts as [`BookingStatus::Pending`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBooking {
    /// Owning customer
    pub customer_id: CustomerId,
    /// Reserved resource reference
    pub resource: String,
    /// Start of the reservation window
    pub start_date: DateTime<Utc>,
    /// End of the reservation window
    pub end_date: DateTime<Utc>,
    /// Party size
    pub guests: u32,
    /// Optional free text
    pub notes: Option<String>,
}

impl Validate for NewBooking {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        rules::check_customer_id(&mut errors, self.customer_id.value());
        rules::check_resource(&mut errors, &self.resource);
        rules::check_window(&mut errors, self.start_date, self.end_date);
        rules::check_guests(&mut errors, i64::from(self.guests));
        rules::check_notes(&mut errors, self.notes.as_deref());

        errors.into_result()
    }
}

/// Per-field booking rules.
///
/// Exposed so that a partially parsed representation can still have its
/// present fields checked alongside the missing ones.
pub mod rules {
    use super::{MAX_GUESTS, MAX_NOTES_LEN, MAX_RESOURCE_LEN};
    use crate::validation::ValidationErrors;
    use chrono::{DateTime, Utc};

    /// `customerId` must be positive.
    pub fn check_customer_id(errors: &mut ValidationErrors, customer_id: i64) {
        if customer_id <= 0 {
            errors.add("customerId", "must be a positive integer");
        }
    }

    /// `resource` must be non-blank and at most [`MAX_RESOURCE_LEN`] characters.
    pub fn check_resource(errors: &mut ValidationErrors, resource: &str) {
        let resource = resource.trim();
        if resource.is_empty() {
            errors.add("resource", "must not be blank");
        } else if resource.chars().count() > MAX_RESOURCE_LEN {
            errors.add(
                "resource",
                format!("must be at most {MAX_RESOURCE_LEN} characters"),
            );
        }
    }

    /// The window must end after it starts.
    pub fn check_window(errors: &mut ValidationErrors, start: DateTime<Utc>, end: DateTime<Utc>) {
        if start >= end {
            errors.add("endDate", "must be after startDate");
        }
    }

    /// `guests` must lie in `1..=MAX_GUESTS`.
    pub fn check_guests(errors: &mut ValidationErrors, guests: i64) {
        if !(1..=i64::from(MAX_GUESTS)).contains(&guests) {
            errors.add("guests", format!("must be between 1 and {MAX_GUESTS}"));
        }
    }

    /// `notes`, when present, must be at most [`MAX_NOTES_LEN`] characters.
    pub fn check_notes(errors: &mut ValidationErrors, notes: Option<&str>) {
        if notes.is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN) {
            errors.add("notes", format!("must be at most {MAX_NOTES_LEN} characters"));
        }
    }
}
