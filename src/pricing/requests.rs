//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Request to count nights between two (possibly unset) dates
#[derive(Debug, Deserialize)]
pub struct ComputeNightsRequest {
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
}

/// Request to price a given number of nights
#[derive(Debug, Deserialize)]
pub struct ComputeBreakdownRequest {
    pub nights: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub nightly_rate: Decimal,
}

/// Request to quote a stay for the booking widget
#[derive(Debug, Deserialize)]
pub struct QuoteStayRequest {
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub nightly_rate: Decimal,
    #[serde(default = "default_guests")]
    pub guests: u32,
    /// The listing's capacity, when known.
    #[serde(default)]
    pub max_guests: Option<u32>,
}

pub(crate) fn default_guests() -> u32 {
    1
}
