use serde::Serialize;

// ============================================================================
// Field Validation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid field: {field}")]
    UnknownField { field: String },

    #[error("{message}")]
    ConversionFailure { field: String, message: String },

    #[error("{message}")]
    ConstraintViolation { field: String, message: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::UnknownField { field }
            | ValidationError::ConversionFailure { field, .. }
            | ValidationError::ConstraintViolation { field, .. } => field,
        }
    }
}

/// One violated constraint in a whole-request validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for FieldViolation {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        FieldViolation::new(field, err.to_string())
    }
}
