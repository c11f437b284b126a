// ============================================================================
// HTTP API - account opening endpoints
// ============================================================================
//
//   POST /v1/api/customers/start
//   PUT  /v1/api/customers/{requestId}/pause
//   PUT  /v1/api/customers/{requestId}/resume
//   GET  /v1/api/customers/{requestId}
//   POST /v1/api/customers/validate
//
// ============================================================================

mod dto;
mod errors;
mod handlers;

use actix_web::web;

pub use handlers::AppState;

pub const API_PATH: &str = "/v1/api/customers";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PATH)
            .route("/start", web::post().to(handlers::start_registration))
            .route("/validate", web::post().to(handlers::validate_field))
            .route("/{request_id}", web::get().to(handlers::get_registration))
            .route("/{request_id}/pause", web::put().to(handlers::pause_registration))
            .route("/{request_id}/resume", web::put().to(handlers::resume_registration)),
    );
}

// ============================================================================
// Endpoint Tests
// ============================================================================
