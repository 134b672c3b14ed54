//! Error kinds surfaced by repositories and services.

use crate::booking::{BookingId, BookingStatus};
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Message carried by [`ServiceError::ResourceAlreadyExists`].
pub const RESOURCE_ALREADY_EXISTS_MESSAGE: &str = "Duplicated entry, the resource already exists.";

/// Errors raised by a repository implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint or attribute
        constraint: String,
    },

    /// Connection, query or decoding failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Errors raised by the booking and customer services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The inbound representation violates field constraints.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The referenced resource does not exist.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource kind, e.g. `"Booking"`
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// A create operation collided with an existing unique resource.
    #[error("{}", RESOURCE_ALREADY_EXISTS_MESSAGE)]
    ResourceAlreadyExists,

    /// The requested status change is not part of the lifecycle.
    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: BookingStatus,
        /// Requested status
        to: BookingStatus,
    },

    /// The booking changed between load and write.
    #[error("Booking {id} was modified concurrently")]
    ConcurrentModification {
        /// The contended booking
        id: BookingId,
    },

    /// Persistence failure that is not a domain outcome.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    /// Shorthand for [`ServiceError::NotFound`].
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation { .. } => Self::ResourceAlreadyExists,
            RepositoryError::Database(_) => Self::Repository(err),
        }
    }
}

/// Result alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_already_exists_message_is_fixed() {
        assert_eq!(
            ServiceError::ResourceAlreadyExists.to_string(),
            "Duplicated entry, the resource already exists."
        );
    }

    #[test]
    fn unique_violation_becomes_resource_already_exists() {
        let err: ServiceError = RepositoryError::UniqueViolation {
            constraint: "customers_email_key".to_string(),
        }
        .into();
        assert_eq!(err, ServiceError::ResourceAlreadyExists);
    }

    #[test]
    fn database_error_stays_a_repository_error() {
        let err: ServiceError = RepositoryError::Database("connection reset".to_string()).into();
        assert!(matches!(err, ServiceError::Repository(_)));
        assert_eq!(err.to_string(), "Database error: connection reset");
    }

    #[test]
    fn not_found_display() {
        let err = ServiceError::not_found("Booking", 999);
        assert_eq!(err.to_string(), "Booking with id 999 not found");
    }
}
