use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::fields::FieldValue;

const ADULT_AGE: u32 = 18;

// ============================================================================
// Constraints
// ============================================================================
//
// Each constraint inspects a value that is already converted to its semantic
// type. A constraint that does not apply to a value's type passes.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    NotNull,
    /// Character length within `min..=max`
    Size {
        min: usize,
        max: usize,
        message: Option<&'static str>,
    },
    Pattern(Pattern),
    Email,
    Past,
    Adult,
    DecimalMinExclusive(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Dutch postcode, e.g. `1234 AB`
    PostalCode,
}

impl Pattern {
    fn regex(&self) -> &'static Regex {
        static POSTAL_CODE: OnceLock<Regex> = OnceLock::new();

        match self {
            Pattern::PostalCode => POSTAL_CODE
                .get_or_init(|| Regex::new(r"^\d{4} [A-Z]{2}$").expect("postal code pattern compiles")),
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Pattern::PostalCode => "Postcode must be in the format '1234 AB'.",
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();

    EMAIL.get_or_init(|| {
        Regex::new(
            r#"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"#,
        )
        .expect("email pattern compiles")
    })
}

impl Constraint {
    /// Whether `value` satisfies the constraint, judged against `today`
    pub fn is_satisfied(&self, value: &FieldValue, today: NaiveDate) -> bool {
        match (self, value) {
            // a converted value is present; absence is checked by `FieldSpec::is_required`
            (Constraint::NotNull, _) => true,
            (Constraint::Size { min, max, .. }, FieldValue::Text(text)) => {
                let len = text.chars().count();
                len >= *min && len <= *max
            }
            (Constraint::Pattern(pattern), FieldValue::Text(text)) => pattern.regex().is_match(text),
            // empty is not an address, but it is not a malformed one either
            (Constraint::Email, FieldValue::Text(text)) => text.is_empty() || email_regex().is_match(text),
            (Constraint::Past, FieldValue::Date(date)) => *date < today,
            (Constraint::Adult, FieldValue::Date(date)) => today
                .years_since(*date)
                .is_some_and(|years| years >= ADULT_AGE),
            (Constraint::DecimalMinExclusive(min), FieldValue::Decimal(value)) => value > min,
            _ => true,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Constraint::NotNull => "must not be null".to_string(),
            Constraint::Size { message: Some(message), .. } => message.to_string(),
            Constraint::Size { min, max, message: None } => {
                format!("size must be between {} and {}", min, max)
            }
            Constraint::Pattern(pattern) => pattern.message().to_string(),
            Constraint::Email => "must be a well-formed email address".to_string(),
            Constraint::Past => "must be a date in the past".to_string(),
            Constraint::Adult => format!("Customer must be at least {} years old.", ADULT_AGE),
            Constraint::DecimalMinExclusive(min) => format!("must be greater than {:?}", min),
        }
    }
}
