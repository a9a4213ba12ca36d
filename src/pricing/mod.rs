//! Stay pricing engine.
//!
//! Nights-of-stay and price breakdowns for the booking widget and the
//! checkout summary.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{compute_breakdown, compute_nights, round_money, PriceBreakdown};
pub use models::{
    check_stay_length, DateRange, FeeSchedule, PricingPolicy, MAX_AMOUNT, MAX_STAY_NIGHTS,
};
pub use routes::router;
pub use services::{parse_stay_date, quote_stay, PricingError, StayQuote};
