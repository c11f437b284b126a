use std::sync::Arc;
use uuid::Uuid;

use crate::store::RegistrationStore;
use crate::utils::{Clock, RequestIdGenerator};

use super::aggregate::CustomerRegistration;
use super::commands::{RegistrationCommand, RegistrationDetails};
use super::errors::RegistrationError;

// ============================================================================
// Registration Command Handler
// ============================================================================
//
// Orchestrates: Command → load → guard on Aggregate → save (compare-and-set)
//
// A guard failure returns before anything is written, and a stale write is
// rejected by the store, so a failed command never leaves partial state.
//
// ============================================================================

pub struct RegistrationCommandHandler {
    store: Arc<dyn RegistrationStore>,
    clock: Arc<dyn Clock>,
    request_ids: Arc<dyn RequestIdGenerator>,
}

impl RegistrationCommandHandler {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        clock: Arc<dyn Clock>,
        request_ids: Arc<dyn RequestIdGenerator>,
    ) -> Self {
        Self { store, clock, request_ids }
    }

    /// Handle a command and return the persisted registration
    pub async fn handle(&self, command: RegistrationCommand) -> Result<CustomerRegistration, RegistrationError> {
        let command_name = command.name();

        let result = match command {
            RegistrationCommand::Start { details } => self.start(details).await,
            RegistrationCommand::Pause { request_id } => self.pause(&request_id).await,
            RegistrationCommand::Resume { request_id, details } => self.resume(&request_id, details).await,
        };

        if let Err(ref e) = result {
            tracing::warn!(command = command_name, error = %e, "Registration command rejected");
        }

        result
    }

    pub async fn start(&self, details: RegistrationDetails) -> Result<CustomerRegistration, RegistrationError> {
        let request_id = self.request_ids.generate();
        tracing::info!(request_id = %request_id, "Starting account registration");

        let registration = CustomerRegistration::start(Uuid::new_v4(), request_id, details);
        let saved = self.store.save(registration).await?;

        tracing::info!(request_id = %saved.request_id, "✅ Created account registration");
        Ok(saved)
    }

    pub async fn pause(&self, request_id: &str) -> Result<CustomerRegistration, RegistrationError> {
        tracing::info!(request_id = %request_id, "Pausing account registration");

        let mut registration = self.load(request_id).await?;
        registration.pause(self.clock.now())?;

        Ok(self.store.save(registration).await?)
    }

    pub async fn resume(
        &self,
        request_id: &str,
        details: RegistrationDetails,
    ) -> Result<CustomerRegistration, RegistrationError> {
        tracing::info!(request_id = %request_id, "Resuming account registration");

        let mut registration = self.load(request_id).await?;
        registration.resume(details)?;

        Ok(self.store.save(registration).await?)
    }

    pub async fn get_by_request_id(&self, request_id: &str) -> Result<CustomerRegistration, RegistrationError> {
        self.load(request_id).await
    }

    async fn load(&self, request_id: &str) -> Result<CustomerRegistration, RegistrationError> {
        self.store
            .find_by_request_id(request_id)
            .await?
            .ok_or_else(|| RegistrationError::NotFound(request_id.to_string()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{AccountType, Address, RegistrationStatus};
    use crate::store::{InMemoryRegistrationStore, StoreError};
    use crate::utils::clock::ManualClock;
    use crate::utils::request_id::SequenceRequestIdGenerator;
    use crate::utils::RandomRequestIdGenerator;
    use chrono::NaiveDate;

    struct Fixture {
        store: Arc<InMemoryRegistrationStore>,
        clock: Arc<ManualClock>,
        handler: RegistrationCommandHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let clock = Arc::new(ManualClock::amsterdam());
        let handler = RegistrationCommandHandler::new(
            store.clone(),
            clock.clone(),
            Arc::new(RandomRequestIdGenerator),
        );
        Fixture { store, clock, handler }
    }

    fn start_details() -> RegistrationDetails {
        RegistrationDetails {
            name: Some("John Doe".to_string()),
            address: Some(Address {
                street_name: "Street 1".to_string(),
                house_number: "2".to_string(),
                postal_code: "9499 CV".to_string(),
                city: "City".to_string(),
            }),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20),
            email: Some("john.doe@example.com".to_string()),
            ..Default::default()
        }
    }

    fn resume_details() -> RegistrationDetails {
        RegistrationDetails {
            name: Some("John Updated".to_string()),
            address: Some(Address {
                street_name: "Street 2".to_string(),
                house_number: "4".to_string(),
                postal_code: "1234 AB".to_string(),
                city: "City".to_string(),
            }),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20),
            id_document: Some("12345678".to_string()),
            account_type: Some(AccountType::Current),
            starting_balance: Some(100.0),
            monthly_salary: Some(1000.0),
            interested_in_other_products: Some(true),
            email: Some("john.doe@gmail.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_start_creates_in_progress_registration() {
        let f = fixture();

        let first = f.handler.start(start_details()).await.unwrap();
        let second = f.handler.start(start_details()).await.unwrap();

        assert_eq!(first.status, RegistrationStatus::InProgress);
        assert!(!first.request_id.is_empty());
        assert!(first.paused_at.is_none());
        assert_ne!(first.request_id, second.request_id);
        assert_eq!(f.store.len().await, 2);
    }

    #[tokio::test]
    async fn test_start_surfaces_storage_failure_on_duplicate_id() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let handler = RegistrationCommandHandler::new(
            store.clone(),
            Arc::new(ManualClock::amsterdam()),
            Arc::new(SequenceRequestIdGenerator::new(["abc", "abc"])),
        );

        handler.start(start_details()).await.unwrap();
        let result = handler.start(start_details()).await;

        assert!(matches!(
            result.unwrap_err(),
            RegistrationError::Storage(StoreError::DuplicateRequestId(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_pause_sets_status_and_timestamp() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();

        let paused = f.handler.pause(&started.request_id).await.unwrap();

        assert_eq!(paused.status, RegistrationStatus::Paused);
        assert_eq!(paused.paused_at, Some(f.clock.now()));
        assert!(paused.paused_at.unwrap() <= f.clock.now());
        assert_eq!(paused.name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_pause_twice_refreshes_timestamp() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();
        f.handler.pause(&started.request_id).await.unwrap();

        f.clock.advance(chrono::Duration::hours(3));
        let paused = f.handler.pause(&started.request_id).await.unwrap();

        assert_eq!(paused.status, RegistrationStatus::Paused);
        assert_eq!(paused.paused_at, Some(f.clock.now()));
    }

    #[tokio::test]
    async fn test_pause_unknown_request_is_not_found() {
        let f = fixture();

        let result = f.handler.pause("non-existent-id").await;

        assert!(matches!(result.unwrap_err(), RegistrationError::NotFound(id) if id == "non-existent-id"));
    }

    #[tokio::test]
    async fn test_pause_submitted_registration_is_rejected_and_unchanged() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();
        f.handler.pause(&started.request_id).await.unwrap();
        let submitted = f.handler.resume(&started.request_id, resume_details()).await.unwrap();

        let result = f.handler.pause(&started.request_id).await;

        assert!(matches!(result.unwrap_err(), RegistrationError::AlreadySubmitted(_)));
        let stored = f.handler.get_by_request_id(&started.request_id).await.unwrap();
        assert_eq!(stored, submitted);
    }

    #[tokio::test]
    async fn test_resume_not_paused_is_rejected_and_unchanged() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();

        let result = f.handler.resume(&started.request_id, resume_details()).await;

        assert!(matches!(result.unwrap_err(), RegistrationError::NotPaused(_)));
        let stored = f.handler.get_by_request_id(&started.request_id).await.unwrap();
        assert_eq!(stored, started);
    }

    #[tokio::test]
    async fn test_resume_submitted_registration_is_not_paused() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();
        f.handler.pause(&started.request_id).await.unwrap();
        f.handler.resume(&started.request_id, resume_details()).await.unwrap();

        let result = f.handler.resume(&started.request_id, resume_details()).await;

        assert!(matches!(result.unwrap_err(), RegistrationError::NotPaused(_)));
    }

    #[tokio::test]
    async fn test_resume_unknown_request_is_not_found() {
        let f = fixture();

        let result = f.handler.resume("non-existent-id", resume_details()).await;

        assert!(matches!(result.unwrap_err(), RegistrationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resume_submits_and_keeps_identity_fields() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();
        f.handler.pause(&started.request_id).await.unwrap();

        let resumed = f.handler.resume(&started.request_id, resume_details()).await.unwrap();

        assert_eq!(resumed.status, RegistrationStatus::Submitted);
        assert!(resumed.paused_at.is_none());
        assert_eq!(resumed.account_type, Some(AccountType::Current));
        assert_eq!(resumed.email.as_deref(), Some("john.doe@gmail.com"));
        assert_eq!(resumed.name.as_deref(), Some("John Doe"));
        assert_eq!(resumed.address, started.address);
        assert_eq!(resumed.date_of_birth, started.date_of_birth);
    }

    #[tokio::test]
    async fn test_get_by_request_id_returns_stored_state() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();

        let loaded = f.handler.get_by_request_id(&started.request_id).await.unwrap();

        assert_eq!(loaded, started);
        assert!(matches!(
            f.handler.get_by_request_id("missing").await.unwrap_err(),
            RegistrationError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_handle_dispatches_commands() {
        let f = fixture();

        let started = f
            .handler
            .handle(RegistrationCommand::Start { details: start_details() })
            .await
            .unwrap();
        let paused = f
            .handler
            .handle(RegistrationCommand::Pause { request_id: started.request_id.clone() })
            .await
            .unwrap();
        let resumed = f
            .handler
            .handle(RegistrationCommand::Resume {
                request_id: started.request_id.clone(),
                details: resume_details(),
            })
            .await
            .unwrap();

        assert_eq!(paused.status, RegistrationStatus::Paused);
        assert_eq!(resumed.status, RegistrationStatus::Submitted);
    }

    #[tokio::test]
    async fn test_concurrent_write_is_reported_as_conflict() {
        let f = fixture();
        let started = f.handler.start(start_details()).await.unwrap();
        f.handler.pause(&started.request_id).await.unwrap();

        // a second writer still holding the pre-pause snapshot
        let mut stale = started.clone();
        stale.pause(f.clock.now()).unwrap();
        let result: Result<_, RegistrationError> = f.store.save(stale).await.map_err(Into::into);

        assert!(matches!(result.unwrap_err(), RegistrationError::Conflict(_)));
    }
}
