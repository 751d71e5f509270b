//! Configuration module
//!
//! Settings come from the environment (a `.env` file is honoured), may be
//! overridden from the command line, and are validated once at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::MAX_RESERVATION_ATTEMPTS;
use crate::record_backend::RecordBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ASSET_TABLE: &str = "assets";
const DB_MAX_CONNECTIONS: u32 = 10;
const DB_TIMEOUT_SECS: u64 = 5;
const RESERVATION_BACKOFF_BASE_MS: u64 = 5;
const RESERVATION_BACKOFF_MAX_MS: u64 = 200;

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
}

/// Asset lifecycle settings: object store, record store and reservation policy
#[derive(Clone, Debug)]
pub struct AssetServiceConfig {
    pub base: BaseConfig,
    // Object store
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO, etc.)
    pub object_key_prefix: Option<String>,
    // Record store
    pub record_backend: RecordBackend,
    pub asset_table: String,
    pub dynamodb_endpoint: Option<String>,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Reservation
    pub reservation_max_attempts: u32,
    pub reservation_backoff_base_ms: u64,
    pub reservation_backoff_max_ms: u64,
}

/// Command-line values that take precedence over the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bucket: Option<String>,
    pub table: Option<String>,
    pub port: Option<u16>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AssetServiceConfig>);

impl Config {
    fn inner(&self) -> &AssetServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AssetServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Apply command-line overrides. Call `validate` afterwards.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(bucket) = overrides.bucket {
            self.0.s3_bucket = Some(bucket);
        }
        if let Some(table) = overrides.table {
            self.0.asset_table = table;
        }
        if let Some(port) = overrides.port {
            self.0.base.server_port = port;
        }
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().base.request_timeout_secs)
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn object_key_prefix(&self) -> Option<&str> {
        self.inner().object_key_prefix.as_deref()
    }

    pub fn record_backend(&self) -> RecordBackend {
        self.inner().record_backend
    }

    pub fn asset_table(&self) -> &str {
        &self.inner().asset_table
    }

    pub fn dynamodb_endpoint(&self) -> Option<&str> {
        self.inner().dynamodb_endpoint.as_deref()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().db_max_connections
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().db_timeout_seconds)
    }

    pub fn reservation_max_attempts(&self) -> u32 {
        self.inner().reservation_max_attempts
    }

    pub fn reservation_backoff_base(&self) -> Duration {
        Duration::from_millis(self.inner().reservation_backoff_base_ms)
    }

    pub fn reservation_backoff_max(&self) -> Duration {
        Duration::from_millis(self.inner().reservation_backoff_max_ms)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

impl AssetServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match non_empty_var("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::Pretty,
        };

        let base = BaseConfig {
            server_port: parse_var("PORT", SERVER_PORT)?,
            cors_origins,
            environment,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", REQUEST_TIMEOUT_SECS)?,
            log_format,
        };

        let record_backend = match non_empty_var("RECORD_STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => RecordBackend::DynamoDb,
        };

        Ok(AssetServiceConfig {
            base,
            s3_bucket: non_empty_var("S3_BUCKET"),
            s3_region: non_empty_var("S3_REGION").or_else(|| non_empty_var("AWS_REGION")),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
            object_key_prefix: non_empty_var("OBJECT_KEY_PREFIX"),
            record_backend,
            asset_table: non_empty_var("ASSET_TABLE").unwrap_or_else(|| ASSET_TABLE.to_string()),
            dynamodb_endpoint: non_empty_var("DYNAMODB_ENDPOINT"),
            database_url: non_empty_var("DATABASE_URL"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_var("DB_TIMEOUT_SECONDS", DB_TIMEOUT_SECS)?,
            reservation_max_attempts: parse_var(
                "RESERVATION_MAX_ATTEMPTS",
                MAX_RESERVATION_ATTEMPTS,
            )?,
            reservation_backoff_base_ms: parse_var(
                "RESERVATION_BACKOFF_BASE_MS",
                RESERVATION_BACKOFF_BASE_MS,
            )?,
            reservation_backoff_max_ms: parse_var(
                "RESERVATION_BACKOFF_MAX_MS",
                RESERVATION_BACKOFF_MAX_MS,
            )?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let env = self.base.environment.to_lowercase();
        let is_production = env == "production" || env == "prod";
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
        }

        if self.s3_bucket.is_none() {
            return Err(anyhow::anyhow!(
                "S3_BUCKET (or --bucket) must be set to the bucket holding assets"
            ));
        }
        if self.s3_region.is_none() {
            return Err(anyhow::anyhow!("S3_REGION or AWS_REGION must be set"));
        }

        if self.asset_table.trim().is_empty() {
            return Err(anyhow::anyhow!("ASSET_TABLE cannot be empty"));
        }

        match self.record_backend {
            RecordBackend::Postgres => {
                let url = self.database_url.as_deref().unwrap_or_default();
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string when RECORD_STORE_BACKEND=postgres"
                    ));
                }
                let is_identifier = self
                    .asset_table
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                    && !self.asset_table.starts_with(|c: char| c.is_ascii_digit());
                if !is_identifier {
                    return Err(anyhow::anyhow!(
                        "ASSET_TABLE must be a plain SQL identifier for the postgres backend"
                    ));
                }
                if self.db_max_connections == 0 {
                    return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
                }
            }
            RecordBackend::DynamoDb | RecordBackend::Memory => {}
        }

        if self.reservation_max_attempts == 0 {
            return Err(anyhow::anyhow!("RESERVATION_MAX_ATTEMPTS must be at least 1"));
        }
        if self.reservation_backoff_base_ms > self.reservation_backoff_max_ms {
            return Err(anyhow::anyhow!(
                "RESERVATION_BACKOFF_BASE_MS cannot exceed RESERVATION_BACKOFF_MAX_MS"
            ));
        }

        Ok(())
    }
}
