//! Explicit field validation.
//!
//! Inbound representations are checked by calling [`Validate::validate`]
//! before they are converted into domain drafts. All violations are collected
//! so the caller sees every offending field at once.

use serde::Serialize;
use std::fmt;

/// A single violated field constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the offending field
    pub field: String,
    /// Human-readable description of the constraint
    pub message: String,
}

/// Ordered collection of field violations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a collection holding one violation.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a violation.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Append every violation from `other`.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the violations in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Structural and field-level constraints of a value.
pub trait Validate {
    /// Check every constraint.
    ///
    /// # Errors
    ///
    /// Returns all violated constraints.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_ok() {
        assert_eq!(ValidationErrors::new().into_result(), Ok(()));
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = ValidationErrors::single("name", "must not be blank");
        errors.add("email", "must be a valid address");
        assert_eq!(
            errors.to_string(),
            "name: must not be blank; email: must be a valid address"
        );
    }

    #[test]
    fn merge_keeps_order() {
        let mut errors = ValidationErrors::single("a", "x");
        errors.merge(ValidationErrors::single("b", "y"));
        let fields: Vec<_> = errors.fields().map(|e| e.field.clone()).collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(errors.len(), 2);
    }
}
