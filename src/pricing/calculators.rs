//! Core stay pricing functions.
//!
//! Pure functions for pricing math - no I/O, no shared state. Callers
//! validate inputs through the constructors in `models` before reaching here.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::PricingPolicy;

/// Round to specified decimal places, midpoints away from zero.
///
/// Fees shown at checkout are whole currency units and a half unit is always
/// rounded up for the (non-negative) amounts this crate deals with.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use staybook_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Count nights between two optional calendar dates.
///
/// Returns 0 while either date is unset. The difference is absolute, so a
/// reversed pair counts the same as the forward one; `DateRange::new` is the
/// place that rejects reversed stays.
pub fn compute_nights(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u32 {
    match (check_in, check_out) {
        (Some(start), Some(end)) => {
            let days = end.signed_duration_since(start).num_days().unsigned_abs();
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}

/// Itemized price for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub subtotal: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

/// Compute the price breakdown for `nights` under `policy`.
///
/// Service fee and taxes are percentages of the subtotal, each rounded to
/// whole currency units with [`round_money`]. The cleaning fee is flat and is
/// charged even for zero nights.
///
/// Any night count under any `PricingPolicy` stays inside `Decimal`'s range:
/// policy amounts are capped at [`MAX_AMOUNT`](super::models::MAX_AMOUNT).
pub fn compute_breakdown(nights: u32, policy: &PricingPolicy) -> PriceBreakdown {
    let subtotal = Decimal::from(nights) * policy.nightly_rate();
    let cleaning_fee = policy.cleaning_fee();
    let service_fee = round_money(subtotal * policy.service_fee_rate(), 0);
    let taxes = round_money(subtotal * policy.tax_rate(), 0);

    PriceBreakdown {
        nights,
        subtotal,
        cleaning_fee,
        service_fee,
        taxes,
        total: subtotal + cleaning_fee + service_fee + taxes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{MAX_AMOUNT, MAX_STAY_NIGHTS};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn observed_policy(nightly_rate: Decimal) -> PricingPolicy {
        PricingPolicy::new(nightly_rate, dec!(75), dec!(0.14), dec!(0.12)).unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(0.5), 0), dec!(1));
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(4.5), 0), dec!(5));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(12.49), 0), dec!(12));
        assert_eq!(round_money(dec!(12.51), 0), dec!(13));
    }

    #[test]
    fn test_round_money_zero() {
        assert_eq!(round_money(dec!(0), 0), dec!(0));
    }

    // ==================== compute_nights tests ====================

    #[test]
    fn test_compute_nights_observed_stay() {
        assert_eq!(
            compute_nights(Some(date("2025-03-15")), Some(date("2025-03-20"))),
            5
        );
    }

    #[test]
    fn test_compute_nights_exact_offsets() {
        let start = date("2024-02-27");
        for n in [0u32, 1, 2, 3, 30, 365, 366] {
            let end = start + chrono::Days::new(u64::from(n));
            assert_eq!(compute_nights(Some(start), Some(end)), n);
        }
    }

    #[test]
    fn test_compute_nights_unset_dates() {
        assert_eq!(compute_nights(None, None), 0);
        assert_eq!(compute_nights(Some(date("2025-03-15")), None), 0);
        assert_eq!(compute_nights(None, Some(date("2025-03-20"))), 0);
    }

    #[test]
    fn test_compute_nights_reversed_is_symmetric() {
        let a = date("2025-03-15");
        let b = date("2025-03-20");
        assert_eq!(compute_nights(Some(b), Some(a)), compute_nights(Some(a), Some(b)));
    }

    #[test]
    fn test_compute_nights_across_month_and_year() {
        assert_eq!(
            compute_nights(Some(date("2024-12-30")), Some(date("2025-01-02"))),
            3
        );
        // leap day
        assert_eq!(
            compute_nights(Some(date("2024-02-28")), Some(date("2024-03-01"))),
            2
        );
    }

    // ==================== compute_breakdown tests ====================

    #[test]
    fn test_compute_breakdown_observed_scenario() {
        let breakdown = compute_breakdown(5, &observed_policy(dec!(320)));

        assert_eq!(breakdown.nights, 5);
        assert_eq!(breakdown.subtotal, dec!(1600));
        assert_eq!(breakdown.cleaning_fee, dec!(75));
        assert_eq!(breakdown.service_fee, dec!(224));
        assert_eq!(breakdown.taxes, dec!(192));
        assert_eq!(breakdown.total, dec!(2091));
    }

    #[test]
    fn test_compute_breakdown_zero_nights_charges_cleaning_only() {
        let breakdown = compute_breakdown(0, &observed_policy(dec!(320)));

        assert_eq!(breakdown.subtotal, dec!(0));
        assert_eq!(breakdown.service_fee, dec!(0));
        assert_eq!(breakdown.taxes, dec!(0));
        assert_eq!(breakdown.total, dec!(75));
    }

    #[test]
    fn test_compute_breakdown_rounds_fees() {
        // 3 * 99 = 297; 297 * 0.14 = 41.58; 297 * 0.12 = 35.64
        let breakdown = compute_breakdown(3, &observed_policy(dec!(99)));

        assert_eq!(breakdown.subtotal, dec!(297));
        assert_eq!(breakdown.service_fee, dec!(42));
        assert_eq!(breakdown.taxes, dec!(36));
        assert_eq!(breakdown.total, dec!(450));
    }

    #[test]
    fn test_compute_breakdown_rounds_midpoint_up() {
        // 1 * 25 = 25; 25 * 0.14 = 3.5; 25 * 0.12 = 3.0
        let breakdown = compute_breakdown(1, &observed_policy(dec!(25)));

        assert_eq!(breakdown.service_fee, dec!(4));
        assert_eq!(breakdown.taxes, dec!(3));
    }

    #[test]
    fn test_compute_breakdown_total_is_sum_of_parts() {
        for nights in [0u32, 1, 2, 7, 13, 31] {
            for rate in [dec!(0), dec!(49.99), dec!(125), dec!(320), dec!(1033.33)] {
                let b = compute_breakdown(nights, &observed_policy(rate));
                assert_eq!(b.total, b.subtotal + b.cleaning_fee + b.service_fee + b.taxes);
                assert!(b.total >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_compute_breakdown_is_idempotent() {
        let policy = observed_policy(dec!(187.5));
        assert_eq!(compute_breakdown(4, &policy), compute_breakdown(4, &policy));
    }

    #[test]
    fn test_compute_breakdown_longest_stay_at_max_rate() {
        let policy = PricingPolicy::new(MAX_AMOUNT, MAX_AMOUNT, dec!(0.14), dec!(0.12)).unwrap();
        let breakdown = compute_breakdown(MAX_STAY_NIGHTS, &policy);

        assert_eq!(breakdown.subtotal, dec!(365000000));
        assert_eq!(breakdown.service_fee, dec!(51100000));
        assert_eq!(breakdown.taxes, dec!(43800000));
        assert_eq!(breakdown.total, dec!(460900000));
    }

    #[test]
    fn test_compute_breakdown_extreme_inputs_do_not_overflow() {
        let policy = PricingPolicy::new(
            MAX_AMOUNT,
            MAX_AMOUNT,
            dec!(0.9999999999999999999999999999),
            dec!(0.9999999999999999999999999999),
        )
        .unwrap();
        let b = compute_breakdown(u32::MAX, &policy);
        assert_eq!(b.subtotal, Decimal::from(u32::MAX) * MAX_AMOUNT);
        assert_eq!(b.total, b.subtotal + b.cleaning_fee + b.service_fee + b.taxes);
    }
}
