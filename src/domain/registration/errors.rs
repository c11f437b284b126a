use crate::store::StoreError;

// ============================================================================
// Registration Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Customer with request id [{0}] not found.")]
    NotFound(String),

    #[error("Customer application for request id [{0}] cannot be paused / resumed, it is already submitted.")]
    AlreadySubmitted(String),

    #[error("Customer application for request id [{0}] cannot be resumed, because its not in paused status")]
    NotPaused(String),

    #[error("Customer application for request id [{0}] was modified concurrently, reload and try again")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { request_id, .. } => RegistrationError::Conflict(request_id),
            other => RegistrationError::Storage(other),
        }
    }
}

impl RegistrationError {
    /// Request id the failure refers to, if any
    pub fn request_id(&self) -> Option<&str> {
        match self {
            RegistrationError::NotFound(id)
            | RegistrationError::AlreadySubmitted(id)
            | RegistrationError::NotPaused(id)
            | RegistrationError::Conflict(id) => Some(id),
            RegistrationError::Storage(_) => None,
        }
    }
}
