//! Application configuration from the environment
//!
//! `.env` is loaded by `main` through dotenvy before `Config::from_env` runs.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::pricing::FeeSchedule;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_CLEANING_FEE: Decimal = dec!(75);
const DEFAULT_SERVICE_FEE_RATE: Decimal = dec!(0.14);
const DEFAULT_TAX_RATE: Decimal = dec!(0.12);
// 24 hours
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
// 30 minutes idle
const DEFAULT_CHECKOUT_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub fees: FeeSchedule,
    pub session_ttl: Duration,
    pub checkout_ttl: Duration,
}

impl Config {
    /// Read `STAYBOOK_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let currency = lookup("STAYBOOK_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let fees = FeeSchedule::new(
            parse_or(&lookup, "STAYBOOK_CLEANING_FEE", DEFAULT_CLEANING_FEE)?,
            parse_or(&lookup, "STAYBOOK_SERVICE_FEE_RATE", DEFAULT_SERVICE_FEE_RATE)?,
            parse_or(&lookup, "STAYBOOK_TAX_RATE", DEFAULT_TAX_RATE)?,
            currency,
        )
        .context("Invalid fee configuration")?;

        Ok(Self {
            host: lookup("STAYBOOK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "STAYBOOK_PORT", DEFAULT_PORT)?,
            fees,
            session_ttl: Duration::from_secs(parse_or(
                &lookup,
                "STAYBOOK_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
            checkout_ttl: Duration::from_secs(parse_or(
                &lookup,
                "STAYBOOK_CHECKOUT_TTL_SECS",
                DEFAULT_CHECKOUT_TTL_SECS,
            )?),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}
