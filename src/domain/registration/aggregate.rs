use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::RegistrationDetails;
use super::errors::RegistrationError;
use super::value_objects::{AccountType, Address, RegistrationStatus};

// ============================================================================
// Customer Registration Aggregate - Business Logic
// ============================================================================
//
// One account-opening case. All state transitions go through the guarded
// methods below; a rejected transition leaves the aggregate untouched.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegistration {
    pub id: Uuid,
    pub request_id: String,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub date_of_birth: Option<NaiveDate>,
    pub id_document: Option<String>,
    pub account_type: Option<AccountType>,
    pub starting_balance: Option<f64>,
    pub monthly_salary: Option<f64>,
    pub interested_in_other_products: Option<bool>,
    pub email: Option<String>,
    pub status: RegistrationStatus,
    pub paused_at: Option<DateTime<FixedOffset>>,
    /// Optimistic concurrency version, 0 until first persisted
    #[serde(default)]
    pub version: i64,
}

impl CustomerRegistration {
    /// New registration in IN_PROGRESS carrying every supplied attribute
    pub fn start(id: Uuid, request_id: impl Into<String>, details: RegistrationDetails) -> Self {
        Self {
            id,
            request_id: request_id.into(),
            name: details.name,
            address: details.address,
            date_of_birth: details.date_of_birth,
            id_document: details.id_document,
            account_type: details.account_type,
            starting_balance: details.starting_balance,
            monthly_salary: details.monthly_salary,
            interested_in_other_products: details.interested_in_other_products,
            email: details.email,
            status: RegistrationStatus::InProgress,
            paused_at: None,
            version: 0,
        }
    }

    /// Pause the application. Only a submitted application is protected;
    /// re-pausing refreshes the timestamp and an expired one may be paused again.
    pub fn pause(&mut self, now: DateTime<FixedOffset>) -> Result<(), RegistrationError> {
        self.ensure_not_submitted()?;

        self.status = RegistrationStatus::Paused;
        self.paused_at = Some(now);
        Ok(())
    }

    /// Resume a paused application and submit it.
    ///
    /// Replaces (not merges) the financial and contact attributes; `name`,
    /// `address` and `date_of_birth` keep their pre-resume values.
    pub fn resume(&mut self, details: RegistrationDetails) -> Result<(), RegistrationError> {
        self.ensure_paused()?;

        self.account_type = details.account_type;
        self.email = details.email;
        self.id_document = details.id_document;
        self.monthly_salary = details.monthly_salary;
        self.interested_in_other_products = details.interested_in_other_products;
        self.starting_balance = details.starting_balance;
        self.paused_at = None;
        self.status = RegistrationStatus::Submitted;
        Ok(())
    }

    /// Expire a stale paused application. `paused_at` is kept as the audit trail.
    pub fn expire(&mut self) -> Result<(), RegistrationError> {
        self.ensure_paused()?;

        self.status = RegistrationStatus::Expired;
        Ok(())
    }

    /// Paused strictly before `cutoff`
    pub fn is_stale(&self, cutoff: DateTime<FixedOffset>) -> bool {
        self.status == RegistrationStatus::Paused
            && self.paused_at.is_some_and(|paused_at| paused_at < cutoff)
    }

    fn ensure_not_submitted(&self) -> Result<(), RegistrationError> {
        match self.status {
            RegistrationStatus::Submitted => {
                Err(RegistrationError::AlreadySubmitted(self.request_id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn ensure_paused(&self) -> Result<(), RegistrationError> {
        match self.status {
            RegistrationStatus::Paused => Ok(()),
            _ => Err(RegistrationError::NotPaused(self.request_id.clone())),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
