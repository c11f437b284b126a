use actix::prelude::*;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod actors;
mod api;
mod config;
mod domain;
mod metrics;
mod store;
mod utils;

use actors::ExpiryScheduler;
use config::{Config, StoreKind};
use domain::registration::{ExpirySweeper, RegistrationCommandHandler};
use domain::validation::FieldValidator;
use store::{InMemoryRegistrationStore, RegistrationStore, ScyllaRegistrationStore};
use utils::{Clock, RandomRequestIdGenerator, SystemClock};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,account_opening=debug"))
        )
        .init();

    let config = Config::parse();
    tracing::info!(
        store = ?config.store,
        utc_offset = %config.utc_offset,
        sweep_hour = config.sweep_hour,
        expiry_days = config.expiry_days,
        "🚀 Starting account opening service"
    );

    // === 1. Registration store ===
    let store: Arc<dyn RegistrationStore> = match config.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store, registrations are lost on restart");
            Arc::new(InMemoryRegistrationStore::new())
        }
        StoreKind::Scylla => Arc::new(connect_scylla(&config).await?),
    };

    // === 2. Collaborators ===
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.utc_offset));
    let registrations = Arc::new(RegistrationCommandHandler::new(
        store.clone(),
        clock.clone(),
        Arc::new(RandomRequestIdGenerator),
    ));
    let validator = Arc::new(FieldValidator::new(clock.clone()));

    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Expiry scheduler ===
    let sweeper = Arc::new(ExpirySweeper::with_expiry_days(store, clock, config.expiry_days));
    let _scheduler = ExpiryScheduler::new(sweeper, metrics.clone(), config.sweep_hour).start();

    // === 4. HTTP server ===
    let state = web::Data::new(api::AppState {
        registrations,
        validator,
        metrics: metrics.clone(),
    });
    let metrics_data = web::Data::new(metrics);

    tracing::info!("✅ Listening on {}:{}{}", config.http_host, config.http_port, api::API_PATH);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .configure(api::configure)
            .configure(metrics::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))?
    .run()
    .await?;

    tracing::info!("Account opening service stopped");
    Ok(())
}

async fn connect_scylla(config: &Config) -> anyhow::Result<ScyllaRegistrationStore> {
    tracing::info!(node = %config.scylla_node, "Connecting to ScyllaDB...");
    let session: Session = SessionBuilder::new()
        .known_node(&config.scylla_node)
        .build()
        .await?;

    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                config.scylla_keyspace
            ),
            &[],
        )
        .await?;

    session.use_keyspace(&config.scylla_keyspace, false).await?;

    let store = ScyllaRegistrationStore::new(Arc::new(session));
    store.ensure_schema().await?;
    Ok(store)
}
