use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::registration::{AccountType, Address, CustomerRegistration, RegistrationStatus};

// ============================================================================
// Wire DTOs
// ============================================================================

/// Client view of a registration, without internal id and version
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
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
}

impl From<CustomerRegistration> for RegistrationResponse {
    fn from(r: CustomerRegistration) -> Self {
        Self {
            request_id: r.request_id,
            name: r.name,
            address: r.address,
            date_of_birth: r.date_of_birth,
            id_document: r.id_document,
            account_type: r.account_type,
            starting_balance: r.starting_balance,
            monthly_salary: r.monthly_salary,
            interested_in_other_products: r.interested_in_other_products,
            email: r.email,
            status: r.status,
            paused_at: r.paused_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateFieldRequest {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSuccessResponse {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailureResponse {
    pub valid: bool,
    pub message: String,
    pub field: String,
}

impl ValidationFailureResponse {
    pub fn new(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub code: &'static str,
    pub errors: Vec<ValidationFailureResponse>,
    pub path: String,
}
