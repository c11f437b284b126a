use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::value_objects::{AccountType, Address};

// ============================================================================
// Registration Commands
// ============================================================================

/// Customer-supplied attributes carried by Start and Resume
///
/// Every attribute is optional here; which ones are required is decided by
/// request validation, and which ones are applied is decided by the command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub account_type: Option<AccountType>,
    #[serde(default)]
    pub starting_balance: Option<f64>,
    #[serde(default)]
    pub monthly_salary: Option<f64>,
    #[serde(default)]
    pub interested_in_other_products: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub enum RegistrationCommand {
    Start {
        details: RegistrationDetails,
    },
    Pause {
        request_id: String,
    },
    Resume {
        request_id: String,
        details: RegistrationDetails,
    },
}

impl RegistrationCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationCommand::Start { .. } => "start",
            RegistrationCommand::Pause { .. } => "pause",
            RegistrationCommand::Resume { .. } => "resume",
        }
    }
}
