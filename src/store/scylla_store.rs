use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use scylla::client::session::Session;
use scylla::response::query_result::QueryResult;
use scylla::value::{CqlValue, Row};
use std::sync::Arc;

use super::{RegistrationStore, StoreError};
use crate::domain::registration::{CustomerRegistration, RegistrationStatus};

// ============================================================================
// ScyllaDB Registration Store
// ============================================================================
//
// Table layout:
// - request_id is the partition key (sole lookup key)
// - status / paused_at / version are real columns so the sweep can filter
//   and lightweight transactions can compare-and-set on version
// - payload holds the full record as JSON
//
// ============================================================================

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS registrations (
    request_id text PRIMARY KEY,
    id uuid,
    status text,
    paused_at timestamp,
    version bigint,
    payload text
)";

pub struct ScyllaRegistrationStore {
    session: Arc<Session>,
}

/// Outcome of a lightweight transaction
struct LwtOutcome {
    applied: bool,
    current_version: Option<i64>,
}

impl ScyllaRegistrationStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Create the registrations table in the session's keyspace
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.session
            .query_unpaged(CREATE_TABLE, &[])
            .await
            .map_err(StoreError::backend)?;

        tracing::info!("Registrations table ready");
        Ok(())
    }

    fn lwt_outcome(result: QueryResult) -> Result<LwtOutcome, StoreError> {
        let rows = result.into_rows_result().map_err(StoreError::backend)?;

        let version_column = rows
            .column_specs()
            .iter()
            .position(|spec| spec.name() == "version");

        let row = rows
            .maybe_first_row::<Row>()
            .map_err(StoreError::backend)?
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("Lightweight transaction returned no rows")))?;

        let applied = matches!(row.columns.first(), Some(Some(CqlValue::Boolean(true))));
        let current_version = version_column.and_then(|idx| match row.columns.get(idx) {
            Some(Some(CqlValue::BigInt(version))) => Some(*version),
            _ => None,
        });

        Ok(LwtOutcome { applied, current_version })
    }
}

#[async_trait]
impl RegistrationStore for ScyllaRegistrationStore {
    async fn save(&self, registration: CustomerRegistration) -> Result<CustomerRegistration, StoreError> {
        let expected_version = registration.version;
        let mut next = registration;
        next.version = expected_version + 1;

        let payload = serde_json::to_string(&next)?;
        let paused_at: Option<DateTime<Utc>> = next.paused_at.map(|at| at.with_timezone(&Utc));

        if expected_version == 0 {
            let result = self
                .session
                .query_unpaged(
                    "INSERT INTO registrations (request_id, id, status, paused_at, version, payload)
                     VALUES (?, ?, ?, ?, ?, ?) IF NOT EXISTS",
                    (
                        next.request_id.clone(),
                        next.id,
                        next.status.as_str(),
                        paused_at,
                        next.version,
                        payload,
                    ),
                )
                .await
                .map_err(StoreError::backend)?;

            if !Self::lwt_outcome(result)?.applied {
                return Err(StoreError::DuplicateRequestId(next.request_id));
            }
        } else {
            let result = self
                .session
                .query_unpaged(
                    "UPDATE registrations SET status = ?, paused_at = ?, version = ?, payload = ?
                     WHERE request_id = ? IF version = ?",
                    (
                        next.status.as_str(),
                        paused_at,
                        next.version,
                        payload,
                        next.request_id.clone(),
                        expected_version,
                    ),
                )
                .await
                .map_err(StoreError::backend)?;

            let outcome = Self::lwt_outcome(result)?;
            if !outcome.applied {
                return Err(StoreError::Conflict {
                    request_id: next.request_id,
                    expected: expected_version,
                    actual: outcome.current_version.unwrap_or(0),
                });
            }
        }

        tracing::debug!(
            request_id = %next.request_id,
            status = %next.status,
            version = next.version,
            "Saved registration to ScyllaDB"
        );

        Ok(next)
    }

    async fn find_by_request_id(&self, request_id: &str) -> Result<Option<CustomerRegistration>, StoreError> {
        let result = self
            .session
            .query_unpaged(
                "SELECT payload FROM registrations WHERE request_id = ?",
                (request_id,),
            )
            .await
            .map_err(StoreError::backend)?;

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(None),
        };

        match rows_result.maybe_first_row::<(String,)>().map_err(StoreError::backend)? {
            Some((payload,)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn find_by_status_and_paused_before(
        &self,
        status: RegistrationStatus,
        cutoff: DateTime<FixedOffset>,
    ) -> Result<Vec<CustomerRegistration>, StoreError> {
        let result = self
            .session
            .query_unpaged(
                "SELECT payload FROM registrations WHERE status = ? AND paused_at < ? ALLOW FILTERING",
                (status.as_str(), cutoff.with_timezone(&Utc)),
            )
            .await
            .map_err(StoreError::backend)?;

        let mut registrations = Vec::new();

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(registrations),
        };

        for row in rows_result.rows::<(String,)>().map_err(StoreError::backend)? {
            let (payload,) = row.map_err(StoreError::backend)?;
            registrations.push(serde_json::from_str(&payload)?);
        }

        tracing::debug!(
            status = %status,
            cutoff = %cutoff,
            count = registrations.len(),
            "Loaded registrations paused before cutoff"
        );

        Ok(registrations)
    }
}
