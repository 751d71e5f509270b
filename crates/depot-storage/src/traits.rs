//! Object signer abstraction trait
//!
//! The service never moves asset bytes itself. Clients talk to the object store
//! directly through time-limited signed URLs produced by an `ObjectSigner`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Signing errors
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Failed to sign URL: {0}")]
    Signing(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for signer operations
pub type SignerResult<T> = Result<T, SignerError>;

/// Produces pre-authorized URLs for a single bucket.
#[async_trait]
pub trait ObjectSigner: Send + Sync {
    /// URL permitting one HTTP PUT of `key` until `expires_in` elapses.
    async fn presigned_put_url(&self, key: &str, expires_in: Duration) -> SignerResult<String>;

    /// URL permitting HTTP GET of `key` until `expires_in` elapses.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> SignerResult<String>;

    /// Bucket the URLs point into
    fn bucket(&self) -> &str;
}
