//! Domain models for stay pricing.
//!
//! Constructors validate at the boundary; once built, a `DateRange` or
//! `PricingPolicy` is always inside its documented domain.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::services::PricingError;

/// Longest stay that can be booked or priced in one go.
pub const MAX_STAY_NIGHTS: u32 = 365;

/// Upper bound for the nightly rate and the cleaning fee.
///
/// Together with `MAX_STAY_NIGHTS` this keeps every breakdown amount far
/// inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000);

/// A complete stay: check-out strictly after check-in, at most
/// `MAX_STAY_NIGHTS` nights long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty, reversed and over-long stays.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, PricingError> {
        if check_out <= check_in {
            return Err(PricingError::InvalidDateRange {
                check_in,
                check_out,
            });
        }
        check_stay_length(super::calculators::compute_nights(
            Some(check_in),
            Some(check_out),
        ))?;
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> u32 {
        super::calculators::compute_nights(Some(self.check_in), Some(self.check_out))
    }
}

/// Reject night counts above `MAX_STAY_NIGHTS`.
pub fn check_stay_length(nights: u32) -> Result<u32, PricingError> {
    if nights > MAX_STAY_NIGHTS {
        return Err(PricingError::StayTooLong {
            nights,
            max: MAX_STAY_NIGHTS,
        });
    }
    Ok(nights)
}

/// Application-wide fee constants, configured once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeSchedule {
    pub cleaning_fee: Decimal,
    pub service_fee_rate: Decimal,
    pub tax_rate: Decimal,
    pub currency: String,
}

impl FeeSchedule {
    pub fn new(
        cleaning_fee: Decimal,
        service_fee_rate: Decimal,
        tax_rate: Decimal,
        currency: impl Into<String>,
    ) -> Result<Self, PricingError> {
        check_amount("cleaning_fee", cleaning_fee)?;
        check_rate("service_fee_rate", service_fee_rate)?;
        check_rate("tax_rate", tax_rate)?;

        Ok(Self {
            cleaning_fee,
            service_fee_rate,
            tax_rate,
            currency: currency.into(),
        })
    }

    /// Combine the schedule with a listing's nightly rate.
    pub fn policy_for(&self, nightly_rate: Decimal) -> Result<PricingPolicy, PricingError> {
        PricingPolicy::new(
            nightly_rate,
            self.cleaning_fee,
            self.service_fee_rate,
            self.tax_rate,
        )
    }
}

/// Pricing inputs for a single booking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingPolicy {
    nightly_rate: Decimal,
    cleaning_fee: Decimal,
    service_fee_rate: Decimal,
    tax_rate: Decimal,
}

impl PricingPolicy {
    pub fn new(
        nightly_rate: Decimal,
        cleaning_fee: Decimal,
        service_fee_rate: Decimal,
        tax_rate: Decimal,
    ) -> Result<Self, PricingError> {
        check_amount("nightly_rate", nightly_rate)?;
        check_amount("cleaning_fee", cleaning_fee)?;
        check_rate("service_fee_rate", service_fee_rate)?;
        check_rate("tax_rate", tax_rate)?;

        Ok(Self {
            nightly_rate,
            cleaning_fee,
            service_fee_rate,
            tax_rate,
        })
    }

    pub fn nightly_rate(&self) -> Decimal {
        self.nightly_rate
    }

    pub fn cleaning_fee(&self) -> Decimal {
        self.cleaning_fee
    }

    pub fn service_fee_rate(&self) -> Decimal {
        self.service_fee_rate
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }
}

fn check_amount(field: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO || value > MAX_AMOUNT {
        return Err(PricingError::InvalidPolicy {
            field,
            reason: format!("must be in [0, {}], got {}", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

// Rates live in [0, 1).
fn check_rate(field: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(PricingError::InvalidPolicy {
            field,
            reason: format!("must be in [0, 1), got {}", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_range_accepts_forward_stay() {
        let range = DateRange::new(date("2025-03-15"), date("2025-03-20")).unwrap();
        assert_eq!(range.nights(), 5);
    }

    #[test]
    fn test_date_range_rejects_same_day() {
        let err = DateRange::new(date("2025-03-15"), date("2025-03-15")).unwrap_err();
        assert!(matches!(err, PricingError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        let err = DateRange::new(date("2025-03-20"), date("2025-03-15")).unwrap_err();
        assert!(err.to_string().contains("2025-03-20"));
    }

    #[test]
    fn test_date_range_accepts_longest_stay() {
        let check_in = date("2025-01-01");
        let check_out = check_in + chrono::Days::new(u64::from(MAX_STAY_NIGHTS));
        let range = DateRange::new(check_in, check_out).unwrap();
        assert_eq!(range.nights(), MAX_STAY_NIGHTS);
        assert_eq!(range.check_in(), check_in);
        assert_eq!(range.check_out(), check_out);
    }

    #[test]
    fn test_date_range_rejects_one_night_too_many() {
        let check_in = date("2025-01-01");
        let check_out = check_in + chrono::Days::new(u64::from(MAX_STAY_NIGHTS) + 1);
        let err = DateRange::new(check_in, check_out).unwrap_err();
        assert_eq!(
            err,
            PricingError::StayTooLong {
                nights: MAX_STAY_NIGHTS + 1,
                max: MAX_STAY_NIGHTS,
            }
        );
    }

    #[test]
    fn test_date_range_rejects_whole_calendar() {
        let err = DateRange::new(date("0001-01-01"), date("9999-12-31")).unwrap_err();
        assert!(matches!(err, PricingError::StayTooLong { .. }));
    }

    #[test]
    fn test_check_stay_length() {
        assert_eq!(check_stay_length(0).unwrap(), 0);
        assert_eq!(check_stay_length(MAX_STAY_NIGHTS).unwrap(), MAX_STAY_NIGHTS);
        assert!(check_stay_length(MAX_STAY_NIGHTS + 1).is_err());
        assert!(check_stay_length(u32::MAX).is_err());
    }

    #[test]
    fn test_policy_accepts_max_amounts() {
        let policy = PricingPolicy::new(MAX_AMOUNT, MAX_AMOUNT, dec!(0.14), dec!(0.12)).unwrap();
        assert_eq!(policy.nightly_rate(), MAX_AMOUNT);
        assert_eq!(policy.cleaning_fee(), MAX_AMOUNT);
    }

    #[test]
    fn test_policy_rejects_rate_above_max() {
        let err = PricingPolicy::new(MAX_AMOUNT + dec!(0.01), dec!(75), dec!(0.14), dec!(0.12))
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidPolicy {
                field: "nightly_rate",
                ..
            }
        ));

        let err = PricingPolicy::new(
            dec!(79228162514264337593543950),
            dec!(75),
            dec!(0.14),
            dec!(0.12),
        )
        .unwrap_err();
        assert!(err.to_string().contains("nightly_rate"));
    }

    #[test]
    fn test_fee_schedule_rejects_cleaning_fee_above_max() {
        let err = FeeSchedule::new(MAX_AMOUNT + dec!(0.01), dec!(0.14), dec!(0.12), "USD")
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidPolicy {
                field: "cleaning_fee",
                ..
            }
        ));
    }

    #[test]
    fn test_policy_rejects_negative_rate() {
        let err = PricingPolicy::new(dec!(-1), dec!(75), dec!(0.14), dec!(0.12)).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidPolicy {
                field: "nightly_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_policy_rejects_rate_of_one() {
        let err = PricingPolicy::new(dec!(100), dec!(75), dec!(1), dec!(0.12)).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidPolicy {
                field: "service_fee_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_policy_accepts_zero_values() {
        let policy = PricingPolicy::new(dec!(0), dec!(0), dec!(0), dec!(0)).unwrap();
        assert_eq!(policy.nightly_rate(), dec!(0));
    }

    #[test]
    fn test_fee_schedule_builds_policy() {
        let fees = FeeSchedule::new(dec!(75), dec!(0.14), dec!(0.12), "USD").unwrap();
        let policy = fees.policy_for(dec!(320)).unwrap();
        assert_eq!(policy.nightly_rate(), dec!(320));
        assert_eq!(policy.cleaning_fee(), dec!(75));
        assert_eq!(policy.service_fee_rate(), dec!(0.14));
        assert_eq!(policy.tax_rate(), dec!(0.12));
    }
}
