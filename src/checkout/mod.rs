//! Booking checkout.
//!
//! A linear flow from trip details to a simulated payment and a confirmation
//! with a scannable code. No payment gateway is involved.

pub mod flow;
pub mod receipt;
pub mod routes;
pub mod store;

pub use flow::{Checkout, CheckoutError, CheckoutStep, Confirmation, ContactDetails, DetailsForm};
pub use routes::router;
pub use store::CheckoutStore;
