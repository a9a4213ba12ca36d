//! Pricing service functions.
//!
//! These sit between the raw values the booking widget sends (ISO date
//! strings, decimal rates, guest counts) and the pure calculators.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{compute_breakdown, PriceBreakdown};
use super::models::{DateRange, FeeSchedule};

/// A price breakdown bound to concrete dates and a party size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StayQuote {
    /// `None` while the guest has not picked both dates yet.
    pub dates: Option<DateRange>,
    pub guests: u32,
    pub nightly_rate: Decimal,
    pub breakdown: PriceBreakdown,
    pub currency: String,
}

/// Pricing validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    InvalidDate {
        field: &'static str,
        value: String,
    },
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    InvalidPolicy {
        field: &'static str,
        reason: String,
    },
    StayTooLong {
        nights: u32,
        max: u32,
    },
    InvalidGuests {
        guests: u32,
    },
    TooManyGuests {
        guests: u32,
        max: u32,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidDate { field, value } => {
                write!(f, "{} is not a YYYY-MM-DD date: {:?}", field, value)
            }
            PricingError::InvalidDateRange {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-out ({}) must be after check-in ({})",
                    check_out, check_in
                )
            }
            PricingError::InvalidPolicy { field, reason } => {
                write!(f, "Invalid pricing policy: {} {}", field, reason)
            }
            PricingError::StayTooLong { nights, max } => {
                write!(f, "Stays are limited to {} nights, got {}", max, nights)
            }
            PricingError::InvalidGuests { guests } => {
                write!(f, "At least one guest is required, got {}", guests)
            }
            PricingError::TooManyGuests { guests, max } => {
                write!(f, "This listing sleeps at most {} guests, got {}", max, guests)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Parse a date as sent by a date input.
///
/// An empty value means "not selected yet" and maps to `None`.
pub fn parse_stay_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, PricingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| PricingError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Quote a stay from raw widget input.
///
/// With both dates set the range must be valid. With either date unset the
/// quote covers zero nights, which still carries the cleaning fee.
/// `max_guests` is the listing's capacity when the caller knows it.
pub fn quote_stay(
    check_in: &str,
    check_out: &str,
    nightly_rate: Decimal,
    guests: u32,
    max_guests: Option<u32>,
    fees: &FeeSchedule,
) -> Result<StayQuote, PricingError> {
    if guests == 0 {
        return Err(PricingError::InvalidGuests { guests });
    }
    if let Some(max) = max_guests.filter(|max| guests > *max) {
        return Err(PricingError::TooManyGuests { guests, max });
    }

    let policy = fees.policy_for(nightly_rate)?;

    let dates = match (
        parse_stay_date("check_in", check_in)?,
        parse_stay_date("check_out", check_out)?,
    ) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
        _ => None,
    };

    let nights = dates.as_ref().map(DateRange::nights).unwrap_or(0);
    let breakdown = compute_breakdown(nights, &policy);

    tracing::debug!(
        nights,
        total = %breakdown.total,
        "Quoted stay"
    );

    Ok(StayQuote {
        dates,
        guests,
        nightly_rate: policy.nightly_rate(),
        breakdown,
        currency: fees.currency.clone(),
    })
}
