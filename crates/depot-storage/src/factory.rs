#[cfg(feature = "storage-s3")]
use crate::S3Signer;
use crate::{ObjectSigner, SignerError, SignerResult};
use depot_core::Config;
use std::sync::Arc;

/// Create the URL signer based on configuration
pub fn create_signer(config: &Config) -> SignerResult<Arc<dyn ObjectSigner>> {
    let bucket = config
        .s3_bucket()
        .map(String::from)
        .ok_or_else(|| SignerError::Config("S3_BUCKET not configured".to_string()))?;
    let region = config
        .s3_region()
        .map(String::from)
        .ok_or_else(|| {
            SignerError::Config("S3_REGION or AWS_REGION not configured".to_string())
        })?;
    let endpoint = config.s3_endpoint().map(String::from);

    #[cfg(feature = "storage-s3")]
    {
        let signer = S3Signer::new(bucket, region, endpoint)?;
        Ok(Arc::new(signer))
    }

    #[cfg(not(feature = "storage-s3"))]
    {
        let _ = (bucket, region, endpoint);
        Err(SignerError::Config(
            "S3 signer not available (storage-s3 feature not enabled)".to_string(),
        ))
    }
}
