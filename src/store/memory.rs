use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{RegistrationStore, StoreError};
use crate::domain::registration::{CustomerRegistration, RegistrationStatus};

/// Process-local store. The write lock makes each compare-and-set atomic.
#[derive(Default)]
pub struct InMemoryRegistrationStore {
    records: RwLock<HashMap<String, CustomerRegistration>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn save(&self, mut registration: CustomerRegistration) -> Result<CustomerRegistration, StoreError> {
        let mut records = self.records.write().await;

        match records.get(&registration.request_id) {
            None if registration.version != 0 => {
                return Err(StoreError::Conflict {
                    request_id: registration.request_id,
                    expected: registration.version,
                    actual: 0,
                });
            }
            Some(_) if registration.version == 0 => {
                return Err(StoreError::DuplicateRequestId(registration.request_id));
            }
            Some(current) if current.version != registration.version => {
                return Err(StoreError::Conflict {
                    request_id: registration.request_id,
                    expected: registration.version,
                    actual: current.version,
                });
            }
            _ => {}
        }

        registration.version += 1;
        records.insert(registration.request_id.clone(), registration.clone());

        tracing::debug!(
            request_id = %registration.request_id,
            status = %registration.status,
            version = registration.version,
            "Saved registration"
        );

        Ok(registration)
    }

    async fn find_by_request_id(&self, request_id: &str) -> Result<Option<CustomerRegistration>, StoreError> {
        Ok(self.records.read().await.get(request_id).cloned())
    }

    async fn find_by_status_and_paused_before(
        &self,
        status: RegistrationStatus,
        cutoff: DateTime<FixedOffset>,
    ) -> Result<Vec<CustomerRegistration>, StoreError> {
        let records = self.records.read().await;

        Ok(records
            .values()
            .filter(|r| r.status == status && r.paused_at.is_some_and(|at| at < cutoff))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::RegistrationDetails;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 2, 3, 13, 0, 0)
            .unwrap()
    }

    fn registration(request_id: &str) -> CustomerRegistration {
        CustomerRegistration::start(Uuid::new_v4(), request_id, RegistrationDetails::default())
    }

    #[tokio::test]
    async fn test_save_assigns_versions() {
        let store = InMemoryRegistrationStore::new();

        let saved = store.save(registration("a1")).await.unwrap();
        assert_eq!(saved.version, 1);

        let saved = store.save(saved).await.unwrap();
        assert_eq!(saved.version, 2);

        let loaded = store.find_by_request_id("a1").await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_duplicate_request_id_rejected() {
        let store = InMemoryRegistrationStore::new();
        store.save(registration("a1")).await.unwrap();

        let result = store.save(registration("a1")).await;

        assert!(matches!(result, Err(StoreError::DuplicateRequestId(id)) if id == "a1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_stale_write_is_a_conflict() {
        let store = InMemoryRegistrationStore::new();
        let saved = store.save(registration("a1")).await.unwrap();

        let mut first = saved.clone();
        first.pause(now()).unwrap();
        store.save(first).await.unwrap();

        let mut second = saved;
        second.pause(now()).unwrap();
        let result = store.save(second).await;

        assert!(matches!(
            result,
            Err(StoreError::Conflict { expected: 1, actual: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = InMemoryRegistrationStore::new();
        assert!(store.find_by_request_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_status_and_paused_before() {
        let store = InMemoryRegistrationStore::new();
        let cutoff = now() - Duration::days(7);

        let mut old = registration("old");
        old.pause(now() - Duration::days(8)).unwrap();
        store.save(old).await.unwrap();

        let mut recent = registration("recent");
        recent.pause(now() - Duration::days(6)).unwrap();
        store.save(recent).await.unwrap();

        let mut expired = registration("expired");
        expired.pause(now() - Duration::days(9)).unwrap();
        expired.expire().unwrap();
        store.save(expired).await.unwrap();

        store.save(registration("active")).await.unwrap();

        let found = store
            .find_by_status_and_paused_before(RegistrationStatus::Paused, cutoff)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].request_id, "old");
    }
}
