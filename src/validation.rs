//! Field-level validation shared by the sign-up and checkout forms.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Per-field validation messages, keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?\d{7,15}$").expect("valid phone regex"))
}

/// Loose email check: something@something.something
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Optional leading `+`, then 7 to 15 digits.
pub fn is_valid_phone(value: &str) -> bool {
    phone_pattern().is_match(value)
}

/// Email rule used by every form: required, then format.
pub fn check_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Email is required");
    } else if !is_valid_email(value) {
        errors.add(field, "Please enter a valid email");
    }
}

pub fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    }
}
