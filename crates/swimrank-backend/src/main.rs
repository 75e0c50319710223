//! `SwimRank` updater backend binary.
//!
//! Wires configuration, the optional `PostgreSQL` store, and the Axum
//! updater API into one process.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `swimrank-config.yaml` with env overrides
//! 3. Connect to `PostgreSQL` and run migrations, when configured
//! 4. Build the shared application state and serve HTTP

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use swimrank_api::server::ServerConfig;
use swimrank_api::state::{AppState, Persistence};
use swimrank_db::PostgresPool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::BackendError;

/// Application entry point for the updater backend.
///
/// # Errors
///
/// Returns an error if configuration loading or the HTTP server fails.
/// Database failures never surface here; they degrade the API instead.
#[tokio::main]
async fn main() -> Result<(), BackendError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("swimrank-backend starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        database_configured = config.database.configured_url().is_some(),
        database_name = config.database.name,
        "Configuration loaded"
    );

    // 3. Connect to the store, when configured.
    let persistence = connect_store(&config).await;

    // 4. Build shared state and serve.
    let state = Arc::new(AppState::new(persistence));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    swimrank_api::start_server(&server_config, state).await?;

    info!("swimrank-backend shutdown complete");
    Ok(())
}

/// Load the backend configuration from `swimrank-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// defaults plus environment overrides are used when it is absent.
fn load_config() -> Result<AppConfig, BackendError> {
    let config_path = Path::new("swimrank-config.yaml");
    if config_path.exists() {
        Ok(AppConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Connect to the configured store and run its migrations.
///
/// Every failure path lands on [`Persistence::Unconfigured`] with a
/// warning. The API's response contract does not depend on the store
/// existing, so a broken database must never abort startup.
async fn connect_store(config: &AppConfig) -> Persistence {
    let Some(url) = config.database.configured_url() else {
        info!("No database URL configured, persistence disabled");
        return Persistence::Unconfigured;
    };

    match PostgresPool::connect_url(url).await {
        Ok(pool) => {
            if let Err(e) = pool.run_migrations().await {
                warn!(error = %e, "Migrations failed, persistence disabled");
                pool.close().await;
                return Persistence::Unconfigured;
            }
            info!("Persistence enabled");
            Persistence::Connected(pool)
        }
        Err(e) => {
            warn!(error = %e, "Database connection failed, persistence disabled");
            Persistence::Unconfigured
        }
    }
}
