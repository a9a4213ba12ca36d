//! Checkout state machine.
//!
//! `details -> payment -> confirmation`, one direction only. Payment is
//! simulated: confirming always succeeds once details were accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::pricing::models::DateRange;
use crate::pricing::StayQuote;
use crate::validation::{check_email, check_required, FieldErrors};

use super::receipt::{render_qr_png_base64, ReceiptError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Details,
    Payment,
    Confirmation,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStep::Details => f.write_str("details"),
            CheckoutStep::Payment => f.write_str("payment"),
            CheckoutStep::Confirmation => f.write_str("confirmation"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Please select check-in and check-out dates")]
    DatesRequired,

    #[error("Cannot {action} while checkout is at the {from} step")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error("Checkout details are invalid")]
    Validation(#[from] FieldErrors),

    #[error("Could not build confirmation: {0}")]
    Receipt(#[from] ReceiptError),
}

/// Contact information kept with the checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Details step submission. Card fields are checked, never stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub name_on_card: String,
    #[serde(default)]
    pub billing_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "United States".to_string()
}

impl DetailsForm {
    fn validate(&self) -> Result<ContactDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        check_email(&mut errors, "email", &self.email);
        check_required(&mut errors, "first_name", &self.first_name, "First name");
        check_required(&mut errors, "last_name", &self.last_name, "Last name");

        let digits: String = self.card_number.chars().filter(|c| *c != ' ').collect();
        if digits.is_empty() {
            errors.add("card_number", "Card number is required");
        } else if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            errors.add("card_number", "Please enter a valid card number");
        }

        if !is_valid_expiry(&self.expiry_date) {
            errors.add("expiry_date", "Expiry must be MM/YY");
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            errors.add("cvv", "Please enter a valid CVV");
        }

        check_required(&mut errors, "name_on_card", &self.name_on_card, "Name on card");
        check_required(&mut errors, "billing_address", &self.billing_address, "Billing address");
        check_required(&mut errors, "city", &self.city, "City");
        check_required(&mut errors, "zip_code", &self.zip_code, "ZIP code");
        check_required(&mut errors, "country", &self.country, "Country");

        errors.into_result()?;

        Ok(ContactDetails {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}

fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.trim().split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 2 && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}

/// Proof of a completed booking
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub code: String,
    pub confirmed_at: DateTime<Utc>,
    pub qr_png_base64: String,
}

/// A booking on its way through checkout
#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    pub id: Uuid,
    pub owner: Uuid,
    pub listing_title: String,
    pub dates: DateRange,
    pub quote: StayQuote,
    pub step: CheckoutStep,
    pub contact: Option<ContactDetails>,
    pub confirmation: Option<Confirmation>,
    pub created_at: DateTime<Utc>,
}

impl Checkout {
    /// Open a checkout for a quote. Both dates must be selected.
    pub fn begin(
        owner: Uuid,
        listing_title: impl Into<String>,
        quote: StayQuote,
        now: DateTime<Utc>,
    ) -> Result<Self, CheckoutError> {
        let dates = quote.dates.ok_or(CheckoutError::DatesRequired)?;

        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            listing_title: listing_title.into(),
            dates,
            quote,
            step: CheckoutStep::Details,
            contact: None,
            confirmation: None,
            created_at: now,
        })
    }

    /// Accept contact and card details, moving on to payment.
    pub fn submit_details(&mut self, form: &DetailsForm) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Details, "submit details")?;
        self.contact = Some(form.validate()?);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Complete the simulated payment and issue a confirmation.
    pub fn confirm_payment(&mut self, now: DateTime<Utc>) -> Result<&Confirmation, CheckoutError> {
        self.expect_step(CheckoutStep::Payment, "confirm payment")?;

        let code = self.confirmation_code();
        let qr_png_base64 = render_qr_png_base64(&format!("STAYBOOK:{}", code))?;

        self.step = CheckoutStep::Confirmation;
        Ok(&*self.confirmation.insert(Confirmation {
            code,
            confirmed_at: now,
            qr_png_base64,
        }))
    }

    /// First 8 hex digits of the checkout id, uppercase.
    pub fn confirmation_code(&self) -> String {
        self.id.simple().to_string()[..8].to_ascii_uppercase()
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step != expected {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                action,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{quote_stay, FeeSchedule};
    use rust_decimal_macros::dec;

    fn fees() -> FeeSchedule {
        FeeSchedule::new(dec!(75), dec!(0.14), dec!(0.12), "USD").unwrap()
    }

    fn checkout() -> Checkout {
        let quote = quote_stay("2025-03-15", "2025-03-20", dec!(320), 2, None, &fees()).unwrap();
        Checkout::begin(Uuid::new_v4(), "Oceanfront villa", quote, Utc::now()).unwrap()
    }

    fn details() -> DetailsForm {
        DetailsForm {
            email: "sarah@example.com".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Lee".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "09/28".to_string(),
            cvv: "123".to_string(),
            name_on_card: "Sarah Lee".to_string(),
            billing_address: "1 Harbor Way".to_string(),
            city: "Monterey".to_string(),
            zip_code: "93940".to_string(),
            country: default_country(),
        }
    }

    #[test]
    fn test_begin_requires_dates() {
        let quote = quote_stay("2025-03-15", "", dec!(320), 1, None, &fees()).unwrap();
        let err = Checkout::begin(Uuid::new_v4(), "Cabin", quote, Utc::now()).unwrap_err();
        assert!(matches!(err, CheckoutError::DatesRequired));
    }

    #[test]
    fn test_full_flow() {
        let mut checkout = checkout();
        assert_eq!(checkout.step, CheckoutStep::Details);
        assert_eq!(checkout.quote.breakdown.total, dec!(2091));

        checkout.submit_details(&details()).unwrap();
        assert_eq!(checkout.step, CheckoutStep::Payment);
        assert_eq!(checkout.contact.as_ref().unwrap().first_name, "Sarah");

        let code = checkout.confirm_payment(Utc::now()).unwrap().code.clone();
        assert_eq!(code.len(), 8);
        assert_eq!(code, checkout.confirmation_code());
        assert_eq!(checkout.step, CheckoutStep::Confirmation);
    }

    #[test]
    fn test_confirm_before_details_is_rejected() {
        let mut checkout = checkout();
        let err = checkout.confirm_payment(Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InvalidTransition {
                from: CheckoutStep::Details,
                ..
            }
        ));
        assert!(checkout.confirmation.is_none());
    }

    #[test]
    fn test_details_cannot_be_resubmitted() {
        let mut checkout = checkout();
        checkout.submit_details(&details()).unwrap();
        let err = checkout.submit_details(&details()).unwrap_err();
        assert!(err.to_string().contains("payment"));
    }

    #[test]
    fn test_invalid_details_keep_step() {
        let mut checkout = checkout();
        let form = DetailsForm {
            email: "nope".to_string(),
            card_number: "4242".to_string(),
            expiry_date: "13/28".to_string(),
            cvv: "12a".to_string(),
            ..details()
        };

        let err = checkout.submit_details(&form).unwrap_err();
        let CheckoutError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("email"), Some("Please enter a valid email"));
        assert_eq!(fields.get("card_number"), Some("Please enter a valid card number"));
        assert_eq!(fields.get("expiry_date"), Some("Expiry must be MM/YY"));
        assert_eq!(fields.get("cvv"), Some("Please enter a valid CVV"));
        assert_eq!(checkout.step, CheckoutStep::Details);
        assert!(checkout.contact.is_none());
    }

    #[test]
    fn test_expiry_format() {
        assert!(is_valid_expiry("01/30"));
        assert!(is_valid_expiry("12/25"));
        assert!(!is_valid_expiry("00/25"));
        assert!(!is_valid_expiry("1/25"));
        assert!(!is_valid_expiry("12/2025"));
        assert!(!is_valid_expiry("1225"));
    }
}
