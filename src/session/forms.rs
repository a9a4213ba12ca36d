//! Auth modal validation.

use chrono::{Datelike, NaiveDate};

use crate::validation::{check_email, check_required, is_valid_phone, FieldErrors};

use super::models::{AuthForm, AuthMode};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_AGE_YEARS: i32 = 18;

/// Validate a login or sign-up submission.
///
/// Login only checks email and password presence. Sign-up adds the password
/// length, names, an 18+ birth date (as of `today`) and a phone number.
pub fn validate_auth_form(form: &AuthForm, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_email(&mut errors, "email", &form.email);

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.mode == AuthMode::Signup && form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }

    if form.mode == AuthMode::Signup {
        check_required(&mut errors, "first_name", &form.first_name, "First name");
        check_required(&mut errors, "last_name", &form.last_name, "Last name");

        match form.birth_date {
            None => errors.add("birth_date", "Birth date is required"),
            Some(born) if age_on(born, today) < MIN_AGE_YEARS => {
                errors.add("birth_date", format!("You must be at least {}", MIN_AGE_YEARS))
            }
            Some(_) => {}
        }

        if form.phone.is_empty() {
            errors.add("phone", "Phone number is required");
        } else if !is_valid_phone(&form.phone) {
            errors.add("phone", "Please enter a valid phone number");
        }
    }

    errors.into_result()
}

/// Completed years between `born` and `today`.
pub fn age_on(born: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        // birthday not reached yet this year
        age -= 1;
    }
    age
}
