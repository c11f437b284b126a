// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

use crate::domain::registration::SweepReport;
use crate::domain::validation::ValidationError;

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Registration commands (outcome, latency)
// - Single-field validations (outcome)
// - Expiry sweeps (runs, expired records, failures)
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Registration Metrics
    pub registration_commands: IntCounterVec,
    pub registration_command_duration: HistogramVec,

    // Validation Metrics
    pub field_validations: IntCounterVec,

    // Expiry Sweep Metrics
    pub expiry_sweeps_total: IntCounter,
    pub registrations_expired_total: IntCounter,
    pub expiry_failures_total: IntCounter,
    pub last_sweep_timestamp: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Registration Metrics
        let registration_commands = IntCounterVec::new(
            Opts::new("registration_commands_total", "Registration commands handled"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(registration_commands.clone()))?;

        let registration_command_duration = HistogramVec::new(
            HistogramOpts::new("registration_command_duration_seconds", "Registration command duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["command"],
        )?;
        registry.register(Box::new(registration_command_duration.clone()))?;

        // Validation Metrics
        let field_validations = IntCounterVec::new(
            Opts::new("field_validations_total", "Single-field validations by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(field_validations.clone()))?;

        // Expiry Sweep Metrics
        let expiry_sweeps_total = IntCounter::new(
            "expiry_sweeps_total",
            "Total expiry sweeps run",
        )?;
        registry.register(Box::new(expiry_sweeps_total.clone()))?;

        let registrations_expired_total = IntCounter::new(
            "registrations_expired_total",
            "Total paused registrations moved to EXPIRED",
        )?;
        registry.register(Box::new(registrations_expired_total.clone()))?;

        let expiry_failures_total = IntCounter::new(
            "expiry_failures_total",
            "Registrations the sweep failed to expire",
        )?;
        registry.register(Box::new(expiry_failures_total.clone()))?;

        let last_sweep_timestamp = IntGauge::new(
            "expiry_last_sweep_timestamp_seconds",
            "Unix time of the last completed expiry sweep",
        )?;
        registry.register(Box::new(last_sweep_timestamp.clone()))?;

        Ok(Self {
            registry,
            registration_commands,
            registration_command_duration,
            field_validations,
            expiry_sweeps_total,
            registrations_expired_total,
            expiry_failures_total,
            last_sweep_timestamp,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a registration command
    pub fn record_command(&self, command: &str, duration_secs: f64, success: bool) {
        let outcome = if success { "success" } else { "rejected" };
        self.registration_commands.with_label_values(&[command, outcome]).inc();
        self.registration_command_duration.with_label_values(&[command]).observe(duration_secs);
    }

    /// Helper to record a single-field validation
    pub fn record_validation(&self, result: &Result<(), ValidationError>) {
        let outcome = match result {
            Ok(()) => "valid",
            Err(ValidationError::UnknownField { .. }) => "unknown_field",
            Err(ValidationError::ConversionFailure { .. }) => "conversion_failure",
            Err(ValidationError::ConstraintViolation { .. }) => "constraint_violation",
        };
        self.field_validations.with_label_values(&[outcome]).inc();
    }

    /// Helper to record a finished expiry sweep
    pub fn record_sweep(&self, report: &SweepReport, finished_at_unix: i64) {
        self.expiry_sweeps_total.inc();
        self.registrations_expired_total.inc_by(report.expired as u64);
        self.expiry_failures_total.inc_by(report.failed as u64);
        self.last_sweep_timestamp.set(finished_at_unix);
    }
}
