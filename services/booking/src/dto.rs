//! Inbound booking representation.
//!
//! Every field is optional on the wire so that a missing field is reported as
//! a `VALIDATION_ERROR` on that field instead of a generic JSON rejection.

use chrono::{DateTime, Utc};
use reservations_core::booking::rules;
use reservations_core::{CustomerId, NewBooking, ValidationErrors};
use serde::Deserialize;

/// Body of `POST /`.
///
/// A `status` member, if present, is ignored: bookings always start `PENDING`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Owning customer
    pub customer_id: Option<i64>,
    /// Reserved resource reference
    pub resource: Option<String>,
    /// RFC 3339 start of the reservation window
    pub start_date: Option<String>,
    /// RFC 3339 end of the reservation window
    pub end_date: Option<String>,
    /// Party size
    pub guests: Option<i64>,
    /// Optional free text
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Convert into a draft, reporting every offending field at once.
    ///
    /// Missing and unparsable fields are reported alongside range and length
    /// violations on the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns the offending fields in wire order.
    pub fn into_new_booking(self) -> Result<NewBooking, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let customer_id = required(&mut errors, "customerId", self.customer_id);
        if let Some(id) = customer_id {
            rules::check_customer_id(&mut errors, id);
        }

        let resource = required(&mut errors, "resource", self.resource);
        if let Some(resource) = &resource {
            rules::check_resource(&mut errors, resource);
        }

        let start_date = required(&mut errors, "startDate", self.start_date)
            .and_then(|raw| timestamp(&mut errors, "startDate", &raw));
        let end_date = required(&mut errors, "endDate", self.end_date)
            .and_then(|raw| timestamp(&mut errors, "endDate", &raw));
        if let (Some(start), Some(end)) = (start_date, end_date) {
            rules::check_window(&mut errors, start, end);
        }

        let guests = required(&mut errors, "guests", self.guests).and_then(|guests| {
            rules::check_guests(&mut errors, guests);
            u32::try_from(guests).ok()
        });

        rules::check_notes(&mut errors, self.notes.as_deref());

        match (customer_id, resource, start_date, end_date, guests) {
            (Some(customer_id), Some(resource), Some(start_date), Some(end_date), Some(guests))
                if errors.is_empty() =>
            {
                Ok(NewBooking {
                    customer_id: CustomerId::new(customer_id),
                    resource,
                    start_date,
                    end_date,
                    guests,
                    notes: self.notes,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, "is required");
    }
    value
}

fn timestamp(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| errors.add(field, "must be an RFC 3339 timestamp"))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reservations_testing::fixtures;

    fn request(value: serde_json::Value) -> BookingRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_request_converts() {
        let draft = request(fixtures::booking_json(42)).into_new_booking().unwrap();

        assert_eq!(draft.customer_id, CustomerId::new(42));
        assert_eq!(draft.resource, "room-101");
        assert_eq!(draft.guests, 2);
        assert_eq!(draft.notes.as_deref(), Some("late arrival"));
        assert_eq!(draft.start_date.to_rfc3339(), "2025-03-01T14:00:00+00:00");
    }

    #[test]
    fn test_supplied_status_is_ignored() {
        let mut body = fixtures::booking_json(42);
        body["status"] = "CONFIRMED".into();

        assert!(request(body).into_new_booking().is_ok());
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let errors = BookingRequest::default().into_new_booking().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec!["customerId", "resource", "startDate", "endDate", "guests"]
        );
    }

    #[test]
    fn test_unparsable_values_are_reported() {
        let mut body = fixtures::booking_json(42);
        body["startDate"] = "tomorrow".into();
        body["guests"] = (-1).into();

        let errors = request(body).into_new_booking().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["startDate", "guests"]);
    }

    #[test]
    fn test_range_errors_are_reported_with_missing_fields() {
        let mut body = fixtures::booking_json(42);
        body.as_object_mut().unwrap().remove("resource");
        body["endDate"] = body["startDate"].clone();
        body["guests"] = 0.into();

        let errors = request(body).into_new_booking().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["resource", "endDate", "guests"]);
    }

    #[test]
    fn test_out_of_range_values_are_rejected_before_conversion() {
        let mut body = fixtures::booking_json(0);
        body["guests"] = 51.into();
        body["notes"] = "x".repeat(1001).into();

        let errors = request(body).into_new_booking().unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["customerId", "guests", "notes"]);
    }
}
