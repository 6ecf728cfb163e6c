//! JobLink Daemon - Main Entry Point
//!
//! Composition root: wires the SQLite adapters into the core services and
//! serves the JSON-RPC API.

mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use joblink_api_rpc::{server::RpcServerConfig, RpcServer};
use joblink_core::application::{NotificationService, OfferService};
use joblink_core::port::id_provider::UuidProvider;
use joblink_core::port::time_provider::SystemTimeProvider;
use joblink_core::port::PathLinkBuilder;
use joblink_infra_sqlite::{
    create_pool, run_migrations, SqliteActivityRepository, SqliteNotificationRepository,
    SqliteOfferRepository,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.joblink/joblink.db";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("JOBLINK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("joblink=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("JobLink engine v{} starting...", VERSION);

    // 1.1. Initialize OpenTelemetry (optional)
    if let Err(e) = telemetry::init_telemetry() {
        tracing::warn!(error = ?e, "Failed to initialize OpenTelemetry (continuing without it)");
    }

    // 2. Load configuration
    let db_path = std::env::var("JOBLINK_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: u16 = std::env::var("JOBLINK_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9544);

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let links = Arc::new(PathLinkBuilder::default());

    let offer_repo = Arc::new(SqliteOfferRepository::new(pool.clone()));
    let notification_repo = Arc::new(SqliteNotificationRepository::new(pool.clone()));
    let activity_repo = Arc::new(SqliteActivityRepository::new(pool.clone()));

    let offer_service = Arc::new(OfferService::new(
        offer_repo.clone(),
        offer_repo.clone(),
        id_provider,
        time_provider.clone(),
    ));

    let notification_service = Arc::new(NotificationService::new(
        notification_repo,
        activity_repo.clone(),
        activity_repo.clone(),
        activity_repo,
        time_provider,
        links,
    ));

    // 5. Startup expiry sweep: persist EXPIRED on offers that lapsed while
    // the daemon was down (read paths are correct either way)
    match offer_service.sweep_expired().await {
        Ok(swept) => info!(swept, "Startup expiry sweep completed"),
        Err(e) => tracing::error!(error = ?e, "Startup expiry sweep failed"),
    }

    // 6. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_server = RpcServer::new(
        rpc_config,
        offer_service,
        notification_service,
        offer_repo,
    );
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!("System ready. Serving offers and notifications.");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
