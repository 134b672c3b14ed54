//! Customer domain types.
//!
//! Customers own bookings. The email address is the natural key: two customers
//! may not share one, compared case-insensitively.

use crate::validation::{Validate, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted customer name or email.
pub const MAX_FIELD_LEN: usize = 255;

/// Unique identifier for a customer, assigned by the repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
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

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Repository-assigned identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Unique, lower-cased email address
    pub email: String,
    /// When the customer was registered
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Materialise a new customer once the repository assigned an id.
    #[must_use]
    pub fn from_new(id: CustomerId, new: NewCustomer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            created_at,
        }
    }
}

/// A customer that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCustomer {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl NewCustomer {
    /// Trim the name and lower-case the email so uniqueness is case-insensitive.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        }
    }
}

impl Validate for NewCustomer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::check_name(&mut errors, &self.name);
        rules::check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

/// Per-field customer rules, shared with partially parsed representations.
pub mod rules {
    use super::{MAX_FIELD_LEN, is_email};
    use crate::validation::ValidationErrors;

    /// `name` must be non-blank and at most [`MAX_FIELD_LEN`] characters.
    pub fn check_name(errors: &mut ValidationErrors, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            errors.add("name", "must not be blank");
        } else if name.chars().count() > MAX_FIELD_LEN {
            errors.add("name", format!("must be at most {MAX_FIELD_LEN} characters"));
        }
    }

    /// `email` must look like an address and fit in [`MAX_FIELD_LEN`] characters.
    pub fn check_email(errors: &mut ValidationErrors, email: &str) {
        let email = email.trim();
        if email.chars().count() > MAX_FIELD_LEN {
            errors.add("email", format!("must be at most {MAX_FIELD_LEN} characters"));
        } else if !is_email(email) {
            errors.add("email", "must be a valid email address");
        }
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn normalized_lowercases_email() {
        let customer = draft("  Ada Lovelace ", " Ada@Example.COM ").normalized();
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email, "ada@example.com");
    }

    #[test]
    fn valid_customer_passes() {
        assert!(draft("Ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "ada", "@example.com", "ada@", "a@b@c", "ada @example.com"] {
            let errors = draft("Ada", email).validate().unwrap_err();
            assert_eq!(errors.fields().next().unwrap().field, "email", "{email}");
        }
    }

    #[test]
    fn rejects_blank_name() {
        let errors = draft(" ", "ada@example.com").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
