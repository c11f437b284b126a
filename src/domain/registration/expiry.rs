use chrono::Duration;
use std::sync::Arc;

use crate::store::RegistrationStore;
use crate::utils::Clock;

use super::value_objects::RegistrationStatus;

/// Paused registrations older than this are expired
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Longest accepted expiry window, ten years
pub const MAX_EXPIRY_DAYS: i64 = 3650;

// ============================================================================
// Expiry Sweeper
// ============================================================================
//
// Moves PAUSED registrations whose pause is older than the expiry window to
// EXPIRED. Each record is saved on its own; one failed save does not stop
// the rest of the sweep. Running twice in a row expires nothing the second
// time because EXPIRED records no longer match the query.
//
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub matched: usize,
    pub expired: usize,
    pub failed: usize,
}

pub struct ExpirySweeper {
    store: Arc<dyn RegistrationStore>,
    clock: Arc<dyn Clock>,
    expiry_window: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn RegistrationStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_expiry_days(store, clock, DEFAULT_EXPIRY_DAYS)
    }

    /// Window is clamped to `1..=MAX_EXPIRY_DAYS` so the cutoff always lies in the past
    pub fn with_expiry_days(store: Arc<dyn RegistrationStore>, clock: Arc<dyn Clock>, days: i64) -> Self {
        let bounded = days.clamp(1, MAX_EXPIRY_DAYS);
        if bounded != days {
            tracing::warn!(requested = days, used = bounded, "Expiry window out of range, clamped");
        }

        Self {
            store,
            clock,
            expiry_window: Duration::days(bounded),
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub async fn run_expiry_sweep(&self) -> SweepReport {
        let cutoff = self.clock.now() - self.expiry_window;
        tracing::info!(cutoff = %cutoff, "Expire paused account registrations");

        let candidates = match self
            .store
            .find_by_status_and_paused_before(RegistrationStatus::Paused, cutoff)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(error = %e, "Failed to query paused registrations");
                return SweepReport { failed: 1, ..Default::default() };
            }
        };

        let mut report = SweepReport {
            matched: candidates.len(),
            ..Default::default()
        };

        for mut registration in candidates {
            let request_id = registration.request_id.clone();

            if let Err(e) = registration.expire() {
                tracing::warn!(request_id = %request_id, error = %e, "Skipping registration that is no longer paused");
                report.failed += 1;
                continue;
            }

            match self.store.save(registration).await {
                Ok(_) => report.expired += 1,
                Err(e) => {
                    tracing::warn!(request_id = %request_id, error = %e, "Failed to expire registration");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            matched = report.matched,
            expired = report.expired,
            failed = report.failed,
            "Expired {} paused requests",
            report.expired
        );

        report
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
