use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Registration Value Objects
// ============================================================================

/// Postal address supplied during account opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_name: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
}

/// Kind of account the customer wants to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT",
            AccountType::Savings => "SAVINGS",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT" => Ok(AccountType::Current),
            "SAVINGS" => Ok(AccountType::Savings),
            other => Err(format!("Unknown account type: {}", other)),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration lifecycle status
///
/// ```text
/// IN_PROGRESS ──pause──▶ PAUSED ──resume──▶ SUBMITTED
///                          │
///                          └──sweep (7 days)──▶ EXPIRED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    InProgress,
    Paused,
    Submitted,
    Expired,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::InProgress => "IN_PROGRESS",
            RegistrationStatus::Paused => "PAUSED",
            RegistrationStatus::Submitted => "SUBMITTED",
            RegistrationStatus::Expired => "EXPIRED",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(RegistrationStatus::InProgress),
            "PAUSED" => Ok(RegistrationStatus::Paused),
            "SUBMITTED" => Ok(RegistrationStatus::Submitted),
            "EXPIRED" => Ok(RegistrationStatus::Expired),
            other => Err(format!("Unknown registration status: {}", other)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
