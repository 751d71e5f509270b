//! Capability issuer
//!
//! Decides whether a client may receive a signed URL and for how long.

use crate::services::lifecycle::asset_not_found;
use depot_core::constants::{
    DEFAULT_DOWNLOAD_TTL, MAX_DOWNLOAD_TTL, MIN_DOWNLOAD_TTL, UPLOAD_URL_TTL,
};
use depot_core::{AppError, AssetId, AssetState};
use depot_storage::{object_key, ObjectSigner, SignerError};
use std::sync::Arc;
use std::time::Duration;

/// Resolve the `timeout` query parameter into a download URL lifetime.
///
/// Absent or empty means the default. Anything else must be an integer count of
/// seconds within `[1, 86400]`; nothing is clamped.
pub fn resolve_download_ttl(raw: Option<&str>) -> Result<Duration, AppError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_DOWNLOAD_TTL);
    };

    let seconds: i64 = raw.parse().map_err(|_| {
        AppError::InvalidInput("Invalid argument for timeout, must be integer.".to_string())
    })?;

    let min = MIN_DOWNLOAD_TTL.as_secs() as i64;
    let max = MAX_DOWNLOAD_TTL.as_secs() as i64;
    if !(min..=max).contains(&seconds) {
        return Err(AppError::InvalidInput(
            "Please use a more reasonable timeout.".to_string(),
        ));
    }

    Ok(Duration::from_secs(seconds as u64))
}

fn signing_failure(err: SignerError) -> AppError {
    AppError::Storage(err.to_string())
}

#[derive(Clone)]
pub struct CapabilityIssuer {
    signer: Arc<dyn ObjectSigner>,
    key_prefix: Option<String>,
}

impl CapabilityIssuer {
    pub fn new(signer: Arc<dyn ObjectSigner>, key_prefix: Option<String>) -> Self {
        Self { signer, key_prefix }
    }

    fn key_for(&self, id: &AssetId) -> Result<String, AppError> {
        object_key(self.key_prefix.as_deref(), id).map_err(signing_failure)
    }

    /// Signed PUT URL for a freshly reserved id, valid for 24 hours.
    pub async fn issue_upload(&self, id: &AssetId) -> Result<String, AppError> {
        let key = self.key_for(id)?;
        self.signer
            .presigned_put_url(&key, UPLOAD_URL_TTL)
            .await
            .map_err(signing_failure)
    }

    /// Signed GET URL for an uploaded asset.
    ///
    /// The state is checked before the requested TTL, so a reserved asset answers
    /// "not ready" whatever `timeout` says.
    pub async fn issue_download(
        &self,
        id: &AssetId,
        state: AssetState,
        requested_ttl: Option<&str>,
    ) -> Result<String, AppError> {
        match state {
            AssetState::NotFound => return Err(asset_not_found(id)),
            AssetState::Reserved => {
                return Err(AppError::NotReady(format!(
                    "Asset id '{}' found but upload is not complete.",
                    id
                )))
            }
            AssetState::Uploaded => {}
        }

        let ttl = resolve_download_ttl(requested_ttl)?;
        let key = self.key_for(id)?;
        let url = self
            .signer
            .presigned_get_url(&key, ttl)
            .await
            .map_err(signing_failure)?;

        tracing::debug!(asset_id = %id, ttl_secs = ttl.as_secs(), "Download URL issued");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_storage::S3Signer;

    fn issuer(prefix: Option<&str>) -> CapabilityIssuer {
        let signer = S3Signer::with_static_credentials(
            "bucket".to_string(),
            "us-east-1".to_string(),
            None,
            "AKIDEXAMPLE",
            "secret",
        )
        .unwrap();
        CapabilityIssuer::new(Arc::new(signer), prefix.map(String::from))
    }

    #[test]
    fn test_ttl_defaults_when_absent() {
        assert_eq!(resolve_download_ttl(None).unwrap(), Duration::from_secs(60));
        assert_eq!(resolve_download_ttl(Some("")).unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_ttl_bounds_are_inclusive() {
        assert_eq!(resolve_download_ttl(Some("1")).unwrap(), Duration::from_secs(1));
        assert_eq!(
            resolve_download_ttl(Some("86400")).unwrap(),
            Duration::from_secs(86400)
        );
        assert_eq!(resolve_download_ttl(Some("+5")).unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_ttl_rejections() {
        for raw in ["0", "-5", "86401"] {
            let err = resolve_download_ttl(Some(raw)).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidInput(ref msg) if msg == "Please use a more reasonable timeout."),
                "{raw}"
            );
        }
        for raw in ["abc", "1.5", " 5", "99999999999999999999"] {
            let err = resolve_download_ttl(Some(raw)).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidInput(ref msg) if msg == "Invalid argument for timeout, must be integer."),
                "{raw}"
            );
        }
    }

    #[tokio::test]
    async fn test_state_gates_download() {
        let issuer = issuer(None);
        let id = AssetId::from("abc123");

        let missing = issuer
            .issue_download(&id, AssetState::NotFound, None)
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));

        let pending = issuer
            .issue_download(&id, AssetState::Reserved, Some("abc"))
            .await
            .unwrap_err();
        assert!(matches!(
            pending,
            AppError::NotReady(ref msg) if msg == "Asset id 'abc123' found but upload is not complete."
        ));

        let url = issuer
            .issue_download(&id, AssetState::Uploaded, Some("300"))
            .await
            .unwrap();
        assert!(url.contains("/bucket/abc123?"));
        assert!(url.contains("X-Amz-Expires=300"));
    }

    #[tokio::test]
    async fn test_upload_url_uses_prefix_and_day_long_ttl() {
        let url = issuer(Some("uploads"))
            .issue_upload(&AssetId::from("abc123"))
            .await
            .unwrap();
        assert!(url.contains("/bucket/uploads/abc123?"));
        assert!(url.contains("X-Amz-Expires=86400"));
    }
}
