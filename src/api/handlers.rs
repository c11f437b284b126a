use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

use super::dto::{RegistrationResponse, ValidateFieldRequest, ValidationSuccessResponse};
use super::errors::{ApiError, ApiErrorKind};
use crate::domain::registration::{
    CustomerRegistration, RegistrationCommand, RegistrationCommandHandler, RegistrationDetails, RegistrationError,
};
use crate::domain::validation::FieldValidator;
use crate::metrics::Metrics;

/// Shared state handed to every handler
pub struct AppState {
    pub registrations: Arc<RegistrationCommandHandler>,
    pub validator: Arc<FieldValidator>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    async fn execute(&self, command: RegistrationCommand) -> Result<CustomerRegistration, RegistrationError> {
        let command_name = command.name();
        let started = Instant::now();

        let result = self.registrations.handle(command).await;

        self.metrics
            .record_command(command_name, started.elapsed().as_secs_f64(), result.is_ok());
        result
    }

    fn check_details(&self, details: &RegistrationDetails, path: &str) -> Result<(), ApiError> {
        let violations = self.validator.validate_details(details);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::new(ApiErrorKind::InvalidRequest(violations), path))
        }
    }
}

pub async fn start_registration(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegistrationDetails>,
) -> Result<HttpResponse, ApiError> {
    let details = body.into_inner();
    state.check_details(&details, req.path())?;

    let registration = state
        .execute(RegistrationCommand::Start { details })
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;

    Ok(HttpResponse::Created().json(RegistrationResponse::from(registration)))
}

pub async fn pause_registration(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();

    let registration = state
        .execute(RegistrationCommand::Pause { request_id })
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;

    Ok(HttpResponse::Accepted().json(RegistrationResponse::from(registration)))
}

pub async fn resume_registration(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RegistrationDetails>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();
    let details = body.into_inner();
    state.check_details(&details, req.path())?;

    let registration = state
        .execute(RegistrationCommand::Resume { request_id, details })
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;

    Ok(HttpResponse::Accepted().json(RegistrationResponse::from(registration)))
}

pub async fn get_registration(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let registration = state
        .registrations
        .get_by_request_id(&path.into_inner())
        .await
        .map_err(|e| ApiError::new(e, req.path()))?;

    Ok(HttpResponse::Ok().json(RegistrationResponse::from(registration)))
}

pub async fn validate_field(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ValidateFieldRequest>,
) -> Result<HttpResponse, ApiError> {
    let ValidateFieldRequest { field, value } = body.into_inner();

    let Some(field) = field else {
        return Err(ApiError::new(
            ApiErrorKind::MissingInput {
                field: String::new(),
                message: "Field is required".to_string(),
            },
            req.path(),
        ));
    };
    let Some(value) = value else {
        return Err(ApiError::new(
            ApiErrorKind::MissingInput {
                message: format!("Value is required for field: {}", field),
                field,
            },
            req.path(),
        ));
    };

    let result = state.validator.validate_field(&field, &value);
    state.metrics.record_validation(&result);
    result.map_err(|e| ApiError::new(e, req.path()))?;

    Ok(HttpResponse::Ok().json(ValidationSuccessResponse {
        valid: true,
        message: format!("The {} is valid.", field),
    }))
}
