use chrono::FixedOffset;
use clap::{Parser, ValueEnum};

use crate::domain::registration::{DEFAULT_EXPIRY_DAYS, MAX_EXPIRY_DAYS};

// ============================================================================
// Service Configuration - command line flags with environment fallbacks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Memory,
    Scylla,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "account-opening", about = "Customer account opening service")]
pub struct Config {
    #[arg(long, env = "HTTP_HOST", default_value = "0.0.0.0")]
    pub http_host: String,

    #[arg(long, env = "HTTP_PORT", default_value_t = 8080)]
    pub http_port: u16,

    #[arg(long, env = "STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    #[arg(long, env = "SCYLLA_NODE", default_value = "127.0.0.1:9042")]
    pub scylla_node: String,

    #[arg(long, env = "SCYLLA_KEYSPACE", default_value = "accounts_ks")]
    pub scylla_keyspace: String,

    /// Fixed offset used for timestamps and the sweep schedule
    #[arg(long, env = "UTC_OFFSET", default_value = "+01:00", value_parser = parse_offset)]
    pub utc_offset: FixedOffset,

    /// Local hour at which the daily expiry sweep runs
    #[arg(long, env = "SWEEP_HOUR", default_value_t = 20, value_parser = clap::value_parser!(u32).range(0..24))]
    pub sweep_hour: u32,

    /// Days a registration may stay paused before the sweep expires it
    #[arg(
        long,
        env = "EXPIRY_DAYS",
        default_value_t = DEFAULT_EXPIRY_DAYS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_EXPIRY_DAYS)
    )]
    pub expiry_days: i64,
}

fn parse_offset(raw: &str) -> Result<FixedOffset, String> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|e| format!("invalid UTC offset '{}': {}", raw, e))
}
