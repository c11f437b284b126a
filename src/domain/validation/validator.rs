use chrono::NaiveDate;
use std::sync::Arc;

use super::constraints::Constraint;
use super::errors::{FieldViolation, ValidationError};
use super::fields::{lookup, FieldSpec, FieldValue};
use crate::domain::registration::RegistrationDetails;
use crate::utils::Clock;

// ============================================================================
// Field Validator
// ============================================================================
//
// Validates a single named attribute in isolation (pre-submission checks) or
// every supplied attribute of a request body. Never touches stored data.
//
// ============================================================================

pub struct FieldValidator {
    clock: Arc<dyn Clock>,
}

impl FieldValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Validate one raw value against the named field's constraints
    pub fn validate_field(&self, field: &str, raw: &str) -> Result<(), ValidationError> {
        tracing::debug!(field = %field, "Validating field");

        let spec = lookup(field).ok_or_else(|| ValidationError::UnknownField {
            field: field.to_string(),
        })?;

        let value = spec.convert(raw)?;
        self.check(spec, &value, self.today())
    }

    /// Validate a start / resume request body, collecting every violation
    pub fn validate_details(&self, details: &RegistrationDetails) -> Vec<FieldViolation> {
        let today = self.today();
        let mut violations = Vec::new();

        let mut values: Vec<(&str, Option<FieldValue>)> = vec![
            ("name", details.name.clone().map(FieldValue::Text)),
            ("dateOfBirth", details.date_of_birth.map(FieldValue::Date)),
            ("idDocument", details.id_document.clone().map(FieldValue::Text)),
            ("accountType", details.account_type.map(FieldValue::AccountType)),
            ("startingBalance", details.starting_balance.map(FieldValue::Decimal)),
            ("monthlySalary", details.monthly_salary.map(FieldValue::Decimal)),
            (
                "interestedInOtherProducts",
                details.interested_in_other_products.map(FieldValue::Boolean),
            ),
            ("email", details.email.clone().map(FieldValue::Text)),
        ];

        if let Some(address) = &details.address {
            values.extend([
                ("address.streetName", Some(FieldValue::Text(address.street_name.clone()))),
                ("address.houseNumber", Some(FieldValue::Text(address.house_number.clone()))),
                ("address.postalCode", Some(FieldValue::Text(address.postal_code.clone()))),
                ("address.city", Some(FieldValue::Text(address.city.clone()))),
            ]);
        }

        for (field, value) in values {
            let Some(spec) = lookup(field) else {
                continue;
            };

            match value {
                Some(value) => {
                    if let Err(e) = self.check(spec, &value, today) {
                        violations.push(e.into());
                    }
                }
                None if spec.is_required() => {
                    violations.push(FieldViolation::new(field, Constraint::NotNull.message()));
                }
                None => {}
            }
        }

        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "Request body failed validation");
        }

        violations
    }

    fn check(&self, spec: &FieldSpec, value: &FieldValue, today: NaiveDate) -> Result<(), ValidationError> {
        match spec.constraints.iter().find(|c| !c.is_satisfied(value, today)) {
            Some(violated) => Err(ValidationError::ConstraintViolation {
                field: spec.name.to_string(),
                message: violated.message(),
            }),
            None => Ok(()),
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
