use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::Utc;

use super::dto::{ErrorResponse, ValidationFailureResponse};
use crate::domain::registration::RegistrationError;
use crate::domain::validation::{FieldViolation, ValidationError};

// ============================================================================
// API Errors - domain failures translated into HTTP responses
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Field(#[from] ValidationError),

    #[error("{message}")]
    MissingInput { field: String, message: String },

    #[error("Request body failed validation")]
    InvalidRequest(Vec<FieldViolation>),
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub path: String,
}

impl ApiError {
    pub fn new(kind: impl Into<ApiErrorKind>, path: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }

    fn code(&self) -> &'static str {
        match &self.kind {
            ApiErrorKind::Registration(RegistrationError::NotFound(_)) => "NOT_FOUND_ERROR",
            ApiErrorKind::Registration(RegistrationError::AlreadySubmitted(_)) => "FORBIDDEN_ERROR",
            ApiErrorKind::Registration(RegistrationError::Conflict(_)) => "CONFLICT_ERROR",
            ApiErrorKind::Registration(RegistrationError::Storage(_)) => "INTERNAL_SERVER_ERROR",
            _ => "VALIDATION_ERROR",
        }
    }

    fn details(&self) -> Vec<ValidationFailureResponse> {
        match &self.kind {
            ApiErrorKind::Registration(RegistrationError::Storage(_)) => {
                vec![ValidationFailureResponse::new("Internal server error", "")]
            }
            ApiErrorKind::Registration(e) => {
                vec![ValidationFailureResponse::new(e.to_string(), e.request_id().unwrap_or_default())]
            }
            ApiErrorKind::Field(e) => vec![ValidationFailureResponse::new(e.to_string(), e.field())],
            ApiErrorKind::MissingInput { field, message } => {
                vec![ValidationFailureResponse::new(message.clone(), field.clone())]
            }
            ApiErrorKind::InvalidRequest(violations) => violations
                .iter()
                .map(|v| ValidationFailureResponse::new(v.message.clone(), v.field.clone()))
                .collect(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::Registration(RegistrationError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiErrorKind::Registration(RegistrationError::AlreadySubmitted(_)) => StatusCode::FORBIDDEN,
            ApiErrorKind::Registration(RegistrationError::NotPaused(_)) => StatusCode::BAD_REQUEST,
            ApiErrorKind::Registration(RegistrationError::Conflict(_)) => StatusCode::CONFLICT,
            ApiErrorKind::Registration(RegistrationError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorKind::Field(_) | ApiErrorKind::MissingInput { .. } | ApiErrorKind::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(path = %self.path, error = %self.kind, "Request failed");
        }

        // single-field validation answers with the bare failure body
        if let ApiErrorKind::Field(_) | ApiErrorKind::MissingInput { .. } = &self.kind {
            let failure = self.details().into_iter().next();
            return HttpResponse::build(status).json(failure);
        }

        HttpResponse::build(status).json(ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            code: self.code(),
            errors: self.details(),
            path: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RegistrationError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND_ERROR"),
            (RegistrationError::AlreadySubmitted("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN_ERROR"),
            (RegistrationError::NotPaused("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (RegistrationError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT_ERROR"),
        ];

        for (err, status, code) in cases {
            let api_error = ApiError::new(err, "/v1/api/customers/x");
            assert_eq!(api_error.status_code(), status);
            assert_eq!(api_error.code(), code);
        }
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let err = RegistrationError::Storage(StoreError::backend(anyhow::anyhow!("node 10.0.0.3 unreachable")));
        let api_error = ApiError::new(err, "/v1/api/customers/start");

        assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let details = api_error.details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].message, "Internal server error");
        assert!(!details[0].message.contains("10.0.0.3"));
    }

    #[test]
    fn test_not_found_names_request_id() {
        let api_error = ApiError::new(RegistrationError::NotFound("abc".into()), "/v1/api/customers/abc");
        let details = api_error.details();

        assert_eq!(details[0].field, "abc");
        assert_eq!(details[0].message, "Customer with request id [abc] not found.");
    }
}
