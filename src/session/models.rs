//! Session and user records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who the user is on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UserRole {
    #[default]
    Guest,
    Host,
}

/// Returned when a role string is neither guest nor host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(UserRole::Guest),
            "host" => Ok(UserRole::Host),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Guest => f.write_str("guest"),
            UserRole::Host => f.write_str("host"),
        }
    }
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// An authenticated session, addressed by its token
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: Uuid,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

/// Whether the auth form is logging in or signing up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Auth modal submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthForm {
    #[serde(default)]
    pub mode: AuthMode,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: String,
    #[serde(default, alias = "userType")]
    pub user_type: UserRole,
}
