//! Depot Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by every Depot component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod record_backend;

// Re-export commonly used types
pub use config::{AssetServiceConfig, BaseConfig, Config, ConfigOverrides, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AssetId, AssetRecord, AssetState, AssetStatus};
pub use record_backend::RecordBackend;
