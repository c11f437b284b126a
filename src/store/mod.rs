// ============================================================================
// Registration Store
// ============================================================================
//
// Durable storage for one record per registration, keyed by request id.
//
// Every `save` is a compare-and-set on `version`:
// - version 0  → insert, rejected if the request id already exists
// - version n  → update, rejected unless the stored version is still n
// The saved record is returned with its version bumped.
//
// ============================================================================

mod memory;
mod scylla_store;

pub use memory::InMemoryRegistrationStore;
pub use scylla_store::ScyllaRegistrationStore;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::domain::registration::{CustomerRegistration, RegistrationStatus};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request id already exists: {0}")]
    DuplicateRequestId(String),

    #[error("Concurrency conflict on {request_id}: expected version {expected}, but current is {actual}")]
    Conflict {
        request_id: String,
        expected: i64,
        actual: i64,
    },

    #[error("Failed to (de)serialize registration: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl StoreError {
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        StoreError::Backend(err.into())
    }
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist the whole record, returning it with the new version
    async fn save(&self, registration: CustomerRegistration) -> Result<CustomerRegistration, StoreError>;

    async fn find_by_request_id(&self, request_id: &str) -> Result<Option<CustomerRegistration>, StoreError>;

    /// Records in `status` whose `paused_at` is strictly before `cutoff`
    async fn find_by_status_and_paused_before(
        &self,
        status: RegistrationStatus,
        cutoff: DateTime<FixedOffset>,
    ) -> Result<Vec<CustomerRegistration>, StoreError>;
}
