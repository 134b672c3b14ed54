//! Inbound customer representation.

use reservations_core::customer::rules;
use reservations_core::{NewCustomer, ValidationErrors};
use serde::Deserialize;

/// Body of `POST /`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    /// Display name
    pub name: Option<String>,
    /// Email address, unique across customers
    pub email: Option<String>,
}

impl CustomerRequest {
    /// Convert into a draft, reporting every missing or invalid field.
    ///
    /// # Errors
    ///
    /// Returns the offending fields, `name` before `email`.
    pub fn into_new_customer(self) -> Result<NewCustomer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.name {
            Some(name) => rules::check_name(&mut errors, name),
            None => errors.add("name", "is required"),
        }
        match &self.email {
            Some(email) => rules::check_email(&mut errors, email),
            None => errors.add("email", "is required"),
        }

        match (self.name, self.email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(NewCustomer { name, email }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reservations_testing::fixtures;

    #[test]
    fn test_complete_request_converts() {
        let request: CustomerRequest =
            serde_json::from_value(fixtures::customer_json("ada@example.com")).unwrap();

        assert_eq!(
            request.into_new_customer().unwrap(),
            fixtures::customer_draft("ada@example.com")
        );
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let errors = CustomerRequest::default().into_new_customer().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[test]
    fn test_invalid_email_is_reported_with_missing_name() {
        let request = CustomerRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        };

        let errors = request.into_new_customer().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }
}
