//! Claims Adjudication - API Server Binary
//!
//! This binary starts the HTTP API server for claim intake and adjudication.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! CLAIMS_DATABASE_URL=postgres://... cargo run --bin claims-api
//!
//! # Run without a database
//! CLAIMS_STORAGE=memory cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_HOST` - Server host (default: 0.0.0.0)
//! * `CLAIMS_PORT` - Server port (default: 8080)
//! * `CLAIMS_API_KEY` - Required `X-API-Key` value (default: dev-test-api-key)
//! * `CLAIMS_DATABASE_URL` - PostgreSQL connection string
//! * `CLAIMS_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `CLAIMS_REFERENCE_DATA_PATH` - JSON reference data file (default: seeded tables)
//! * `CLAIMS_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `CLAIMS_LOG_FORMAT` - `json` or `pretty` (default: pretty)
//! * `CLAIMS_DB_MAX_CONNECTIONS` - Pool size (default: 10)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{
    ClaimAdjudicator, ClaimRepositoryPort, ClaimService, InMemoryClaimAdapter,
    StaticReferenceData,
};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimAdapter};
use interface_api::config::{ApiConfig, LogFormat, StorageBackend};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and reference data, connects
/// the claim store, and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::load().context("failed to load configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting claims adjudication API server"
    );

    let reference = load_reference_data(&config)?;
    let repository = connect_storage(&config).await?;

    let service = ClaimService::new(ClaimAdjudicator::new(Arc::new(reference)), repository);
    let app = create_router(AppState::new(service, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Loads reference data from the configured file, or the seeded tables
fn load_reference_data(config: &ApiConfig) -> anyhow::Result<StaticReferenceData> {
    match &config.reference_data_path {
        Some(path) => StaticReferenceData::from_json_file(path)
            .with_context(|| format!("failed to load reference data from {}", path)),
        None => {
            tracing::warn!("No reference data file configured, using seeded tables");
            Ok(StaticReferenceData::seeded())
        }
    }
}

/// Connects the configured claim store
async fn connect_storage(config: &ApiConfig) -> anyhow::Result<Arc<dyn ClaimRepositoryPort>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory claim storage; claims are lost on shutdown");
            Ok(Arc::new(InMemoryClaimAdapter::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let db_config = DatabaseConfig::new(config.database_url.clone())
                .max_connections(config.db_max_connections);
            let pool = create_pool(db_config)
                .await
                .context("failed to connect to database")?;

            run_migrations(&pool)
                .await
                .context("failed to apply migrations")?;

            tracing::info!("Database ready");
            Ok(Arc::new(PostgresClaimAdapter::new(pool)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
