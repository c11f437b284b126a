use chrono::{DateTime, FixedOffset, NaiveDate};
use uuid::Uuid;

use super::constraints::{Constraint, Pattern};
use super::errors::ValidationError;
use crate::domain::registration::{AccountType, RegistrationStatus};

// ============================================================================
// Field Table
// ============================================================================
//
// Closed dispatch table: external field name → semantic kind + constraints.
// Constraints are listed in the order they are reported.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Uuid,
    Decimal,
    /// Lenient: anything other than "true" (any case) is false
    Boolean,
    Date,
    Timestamp,
    AccountType,
    Status,
    /// Has components of its own, cannot be built from one raw value
    Composite,
    Text,
}

/// A raw value converted to its field's semantic type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Uuid(Uuid),
    Decimal(f64),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
    AccountType(AccountType),
    Status(RegistrationStatus),
    Text(String),
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub constraints: &'static [Constraint],
}

pub static FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        kind: FieldKind::Uuid,
        constraints: &[],
    },
    FieldSpec {
        name: "requestId",
        kind: FieldKind::Text,
        constraints: &[Constraint::NotNull],
    },
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        constraints: &[
            Constraint::NotNull,
            Constraint::Size {
                min: 2,
                max: 100,
                message: Some("Name must be between 2 and 100 characters."),
            },
        ],
    },
    FieldSpec {
        name: "address",
        kind: FieldKind::Composite,
        constraints: &[],
    },
    FieldSpec {
        name: "address.streetName",
        kind: FieldKind::Text,
        constraints: &[Constraint::NotNull, Constraint::Size { min: 2, max: 100, message: None }],
    },
    FieldSpec {
        name: "address.houseNumber",
        kind: FieldKind::Text,
        constraints: &[Constraint::NotNull, Constraint::Size { min: 1, max: 6, message: None }],
    },
    FieldSpec {
        name: "address.postalCode",
        kind: FieldKind::Text,
        constraints: &[
            Constraint::NotNull,
            Constraint::Size { min: 0, max: 10, message: None },
            Constraint::Pattern(Pattern::PostalCode),
        ],
    },
    FieldSpec {
        name: "address.city",
        kind: FieldKind::Text,
        constraints: &[Constraint::NotNull, Constraint::Size { min: 2, max: 100, message: None }],
    },
    FieldSpec {
        name: "dateOfBirth",
        kind: FieldKind::Date,
        constraints: &[Constraint::NotNull, Constraint::Past, Constraint::Adult],
    },
    FieldSpec {
        name: "idDocument",
        kind: FieldKind::Text,
        constraints: &[Constraint::Size { min: 1, max: 20, message: None }],
    },
    FieldSpec {
        name: "accountType",
        kind: FieldKind::AccountType,
        constraints: &[],
    },
    FieldSpec {
        name: "startingBalance",
        kind: FieldKind::Decimal,
        constraints: &[Constraint::DecimalMinExclusive(0.0)],
    },
    FieldSpec {
        name: "monthlySalary",
        kind: FieldKind::Decimal,
        constraints: &[Constraint::DecimalMinExclusive(0.0)],
    },
    FieldSpec {
        name: "interestedInOtherProducts",
        kind: FieldKind::Boolean,
        constraints: &[],
    },
    FieldSpec {
        name: "email",
        kind: FieldKind::Text,
        constraints: &[Constraint::Email, Constraint::Size { min: 0, max: 100, message: None }],
    },
    FieldSpec {
        name: "status",
        kind: FieldKind::Status,
        constraints: &[],
    },
    FieldSpec {
        name: "pausedAt",
        kind: FieldKind::Timestamp,
        constraints: &[],
    },
];

pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

impl FieldSpec {
    /// Whether a request body must carry this field
    pub fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::NotNull)
    }

    /// Convert raw text into this field's semantic type
    pub fn convert(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        let failure = |expected: &str| ValidationError::ConversionFailure {
            field: self.name.to_string(),
            message: format!("Value '{}' for field {} is not a valid {}", raw, self.name, expected),
        };

        match self.kind {
            FieldKind::Uuid => raw.parse::<Uuid>().map(FieldValue::Uuid).map_err(|_| failure("UUID")),
            // inf, NaN and out-of-range literals are not amounts
            FieldKind::Decimal => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(FieldValue::Decimal)
                .ok_or_else(|| failure("decimal")),
            FieldKind::Boolean => Ok(FieldValue::Boolean(raw.eq_ignore_ascii_case("true"))),
            FieldKind::Date => raw
                .parse::<NaiveDate>()
                .map(FieldValue::Date)
                .map_err(|_| failure("date (YYYY-MM-DD)")),
            FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw)
                .map(FieldValue::Timestamp)
                .map_err(|_| failure("RFC 3339 timestamp")),
            FieldKind::AccountType => raw
                .parse::<AccountType>()
                .map(FieldValue::AccountType)
                .map_err(|_| failure("account type (CURRENT, SAVINGS)")),
            FieldKind::Status => raw
                .parse::<RegistrationStatus>()
                .map(FieldValue::Status)
                .map_err(|_| failure("status (IN_PROGRESS, PAUSED, SUBMITTED, EXPIRED)")),
            FieldKind::Composite => Err(ValidationError::ConversionFailure {
                field: self.name.to_string(),
                message: format!(
                    "Field {} cannot be set from a single value, validate its components instead",
                    self.name
                ),
            }),
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}
