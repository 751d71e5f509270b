//! Configuration validation
//!
//! Runs once at startup so misconfiguration fails the process instead of a request.

use anyhow::Result;
use depot_core::{Config, RecordBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.record_backend() == RecordBackend::Memory {
        tracing::warn!("In-memory record store selected in production; records do not survive restarts");
    }

    if let Some(endpoint) = config.s3_endpoint() {
        if config.is_production() && endpoint.starts_with("http://") {
            tracing::warn!(
                endpoint = %endpoint,
                "Signed URLs point at a plain HTTP endpoint in production"
            );
        }
    }

    Ok(())
}
