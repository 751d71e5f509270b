use crate::traits::{ObjectSigner, SignerError, SignerResult};
use async_trait::async_trait;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Result as ObjectResult;
use std::time::Duration;

/// S3 URL signer
///
/// Signing is a local computation over the configured credentials; no request
/// reaches S3 until the client uses the URL.
#[derive(Clone)]
pub struct S3Signer {
    store: AmazonS3,
    bucket: String,
}

impl S3Signer {
    /// Create a signer using credentials from the environment
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> SignerResult<Self> {
        let builder = AmazonS3Builder::from_env();
        Self::build(builder, bucket, region, endpoint_url)
    }

    /// Create a signer with explicit credentials instead of the environment chain.
    pub fn with_static_credentials(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> SignerResult<Self> {
        let builder = AmazonS3Builder::new()
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key);
        Self::build(builder, bucket, region, endpoint_url)
    }

    fn build(
        builder: AmazonS3Builder,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> SignerResult<Self> {
        let mut builder = builder
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| SignerError::Config(e.to_string()))?;

        Ok(S3Signer { store, bucket })
    }

    async fn sign(&self, method: Method, key: &str, expires_in: Duration) -> SignerResult<String> {
        let location = Path::parse(key).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(method.clone(), &location, expires_in)
            .await;

        let url = url_result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                method = %method,
                "S3 URL signing failed"
            );
            SignerError::Signing(e.to_string())
        })?;

        Ok(url.to_string())
    }
}

#[async_trait]
impl ObjectSigner for S3Signer {
    async fn presigned_put_url(&self, key: &str, expires_in: Duration) -> SignerResult<String> {
        self.sign(Method::PUT, key, expires_in).await
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> SignerResult<String> {
        self.sign(Method::GET, key, expires_in).await
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> S3Signer {
        S3Signer::with_static_credentials(
            "test-bucket".to_string(),
            "us-east-1".to_string(),
            None,
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_put_url_carries_key_and_expiry() {
        let url = signer()
            .presigned_put_url("abc123", Duration::from_secs(86400))
            .await
            .unwrap();

        assert!(url.contains("/test-bucket/abc123?"), "unexpected url: {url}");
        assert!(url.contains("X-Amz-Expires=86400"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_put_and_get_urls_differ() {
        let signer = signer();
        let ttl = Duration::from_secs(60);
        let put = signer.presigned_put_url("abc123", ttl).await.unwrap();
        let get = signer.presigned_get_url("abc123", ttl).await.unwrap();

        assert!(get.contains("X-Amz-Expires=60"));
        assert_ne!(put, get);
    }

    #[tokio::test]
    async fn test_custom_endpoint_is_used() {
        let signer = S3Signer::with_static_credentials(
            "assets".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
            "minio",
            "minio-secret",
        )
        .unwrap();

        let url = signer
            .presigned_get_url("uploads/abc123", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:9000/assets/uploads/abc123?"));
        assert_eq!(signer.bucket(), "assets");
    }
}
