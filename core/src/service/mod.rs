//! Application services.
//!
//! Services hold their collaborators behind `Arc<dyn ...>` and are cheap to
//! clone into per-request handler state.

pub mod booking;
pub mod customer;

pub use booking::{BOOKING_RESOURCE, BookingService};
pub use customer::{CUSTOMER_RESOURCE, CustomerService};
