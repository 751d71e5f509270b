//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use depot_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    depot_infra::init_telemetry(config.log_format())
        .context("Failed to initialize telemetry")?;

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        record_backend = %config.record_backend(),
        "Configuration loaded and validated successfully"
    );

    let store = depot_db::create_asset_store(&config)
        .await
        .context("Failed to initialize record store")?;
    tracing::info!(
        backend = %store.backend_type(),
        table = %config.asset_table(),
        "Record store ready"
    );

    let signer = depot_storage::create_signer(&config).context("Failed to initialize URL signer")?;
    tracing::info!(bucket = %signer.bucket(), "URL signer ready");

    let state = Arc::new(AppState::new(config.clone(), store, signer));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
