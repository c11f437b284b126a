use actix::prelude::*;
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, TimeZone};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::registration::{ExpirySweeper, SweepReport};
use crate::metrics::Metrics;
use crate::utils::Clock;

// ============================================================================
// Expiry Scheduler Actor - runs the expiry sweep once a day
// ============================================================================
//
// Responsibilities:
// - Fire the sweep at the configured local hour, every day
// - Accept on-demand sweeps through RunExpirySweep
// - Record sweep outcomes in metrics
//
// ============================================================================

#[derive(Message)]
#[rtype(result = "SweepReport")]
pub struct RunExpirySweep;

pub struct ExpiryScheduler {
    sweeper: Arc<ExpirySweeper>,
    metrics: Arc<Metrics>,
    sweep_hour: u32,
}

impl ExpiryScheduler {
    pub fn new(sweeper: Arc<ExpirySweeper>, metrics: Arc<Metrics>, sweep_hour: u32) -> Self {
        Self {
            sweeper,
            metrics,
            sweep_hour,
        }
    }

    fn schedule_next(&self, ctx: &mut Context<Self>) {
        let now = self.sweeper.clock().now();
        let delay = duration_until_next_run(now, self.sweep_hour);

        tracing::info!(
            delay_secs = delay.as_secs(),
            sweep_hour = self.sweep_hour,
            "Next expiry sweep scheduled"
        );

        ctx.run_later(delay, |act, ctx| {
            let addr = ctx.address();
            actix::spawn(async move {
                if let Err(e) = addr.send(RunExpirySweep).await {
                    tracing::error!(error = %e, "Scheduled expiry sweep could not be delivered");
                }
            });
            act.schedule_next(ctx);
        });
    }
}

impl Actor for ExpiryScheduler {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("ExpiryScheduler started");
        self.schedule_next(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("ExpiryScheduler stopped");
    }
}

impl Handler<RunExpirySweep> for ExpiryScheduler {
    type Result = ResponseFuture<SweepReport>;

    fn handle(&mut self, _msg: RunExpirySweep, _ctx: &mut Self::Context) -> Self::Result {
        let sweeper = self.sweeper.clone();
        let metrics = self.metrics.clone();

        Box::pin(async move {
            let report = sweeper.run_expiry_sweep().await;
            metrics.record_sweep(&report, sweeper.clock().now().timestamp());
            report
        })
    }
}

/// Time left until the next `hour:00` in the offset of `now`.
/// An exact hit schedules the following day.
pub fn duration_until_next_run(now: DateTime<FixedOffset>, hour: u32) -> Duration {
    let today_at = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .and_then(|naive| now.offset().from_local_datetime(&naive).single());

    let Some(today_at) = today_at else {
        return Duration::from_secs(24 * 60 * 60);
    };

    let next = if today_at > now {
        today_at
    } else {
        today_at + ChronoDuration::days(1)
    };

    (next - now).to_std().unwrap_or_default()
}
