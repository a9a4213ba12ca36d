//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::PriceBreakdown;
use super::services::StayQuote;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for night counting
#[derive(Debug, Serialize)]
pub struct NightsResponse {
    pub nights: u32,
}

/// Response for a price breakdown
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdownResponse {
    pub nights: u32,
    pub subtotal: MoneyResponse,
    pub cleaning_fee: MoneyResponse,
    pub service_fee: MoneyResponse,
    pub taxes: MoneyResponse,
    pub total: MoneyResponse,
}

impl PriceBreakdownResponse {
    pub fn from_breakdown(breakdown: &PriceBreakdown, currency: &str) -> Self {
        Self {
            nights: breakdown.nights,
            subtotal: MoneyResponse::new(breakdown.subtotal, currency),
            cleaning_fee: MoneyResponse::new(breakdown.cleaning_fee, currency),
            service_fee: MoneyResponse::new(breakdown.service_fee, currency),
            taxes: MoneyResponse::new(breakdown.taxes, currency),
            total: MoneyResponse::new(breakdown.total, currency),
        }
    }
}

/// Response for a stay quote
#[derive(Debug, Clone, Serialize)]
pub struct StayQuoteResponse {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
    pub nightly_rate: MoneyResponse,
    pub breakdown: PriceBreakdownResponse,
}

impl From<&StayQuote> for StayQuoteResponse {
    fn from(quote: &StayQuote) -> Self {
        Self {
            check_in: quote.dates.map(|d| d.check_in()),
            check_out: quote.dates.map(|d| d.check_out()),
            guests: quote.guests,
            nightly_rate: MoneyResponse::new(quote.nightly_rate, &quote.currency),
            breakdown: PriceBreakdownResponse::from_breakdown(&quote.breakdown, &quote.currency),
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
