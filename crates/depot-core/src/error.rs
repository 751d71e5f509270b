//! Error types module
//!
//! All failures reachable from a request are unified under `AppError`. Each variant
//! self-describes how it is presented over HTTP through `ErrorMetadata`, so handlers
//! map store and signer failures onto exactly one variant and never let a failure
//! escape unmapped.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for retryable conditions
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("Reservation exhausted after {attempts} attempts: {message}")]
    ReservationExhausted { attempts: u32, message: String },

    #[error("Reservation failed: {0}")]
    ReservationUnavailable(String),

    #[error("Record store error: {0}")]
    RecordStore(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Method not allowed")]
    MethodNotAllowed { allowed: &'static [&'static str] },

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Invalid JSON payload: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the asset ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotReady(_) => (
            202,
            "NOT_READY",
            true,
            Some("Poll again after the upload has been confirmed"),
            false,
            LogLevel::Debug,
        ),
        AppError::ReservationExhausted { .. } => (
            503,
            "RESERVATION_EXHAUSTED",
            true,
            Some("Retry the request after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::ReservationUnavailable(_) => (
            503,
            "RESERVATION_UNAVAILABLE",
            true,
            Some("Retry the request after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::RecordStore(_) => (
            500,
            "RECORD_STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::MethodNotAllowed { .. } => (
            405,
            "METHOD_NOT_ALLOWED",
            false,
            Some("Use one of the methods listed in the Allow header"),
            false,
            LogLevel::Debug,
        ),
        AppError::Timeout => (
            408,
            "REQUEST_TIMEOUT",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::NotReady(_) => "NotReady",
            AppError::ReservationExhausted { .. } => "ReservationExhausted",
            AppError::ReservationUnavailable(_) => "ReservationUnavailable",
            AppError::RecordStore(_) => "RecordStore",
            AppError::Storage(_) => "Storage",
            AppError::MethodNotAllowed { .. } => "MethodNotAllowed",
            AppError::Timeout => "Timeout",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::NotReady(ref msg) => msg.clone(),
            AppError::ReservationExhausted { .. } | AppError::ReservationUnavailable(_) => {
                "Could not reserve an asset id".to_string()
            }
            AppError::RecordStore(_) => "Unexpected internal error.".to_string(),
            AppError::Storage(_) => "Failed to sign asset URL".to_string(),
            AppError::MethodNotAllowed { allowed } => {
                format!("Method not allowed. Allowed: {}", allowed.join(", "))
            }
            AppError::Timeout => "Request timed out".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Unexpected internal error.".to_string()
            }
        }
    }
}
