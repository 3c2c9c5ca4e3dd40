use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Credentials come from the default AWS provider chain (`AWS_ACCESS_KEY_ID`,
    /// `AWS_SECRET_ACCESS_KEY`, profiles, ...). `endpoint_url` points at an
    /// S3-compatible provider, e.g. "http://localhost:9000" for MinIO, and switches
    /// the client to path-style addressing.
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(region.clone()));

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = endpoint_url {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(S3Storage {
            client: Client::from_conf(s3_config.build()),
            bucket,
            region,
            endpoint_url,
        })
    }

    /// For AWS: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers (path-style): {endpoint}/{bucket}/{key}
    fn generate_url(&self, key: &str) -> String {
        object_url(&self.bucket, &self.region, self.endpoint_url.as_deref(), key)
    }
}

fn object_url(bucket: &str, region: &str, endpoint_url: Option<&str>, key: &str) -> String {
    match endpoint_url {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

/// Request body read from disk in chunks while the put is in flight.
///
/// Only the file length is known up front, so memory use does not grow with the
/// size of the upload.
async fn file_body(path: &Path) -> StorageResult<(ByteStream, u64)> {
    let body = ByteStream::from_path(path).await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let (size, _) = body.size_hint();
    Ok((body, size))
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_file(
        &self,
        storage_key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let start = std::time::Instant::now();

        let (body, size) = file_body(path).await?;

        tracing::info!(bucket = %self.bucket, key = %storage_key, size_bytes = size, "Uploading to S3");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .content_type(content_type)
            .content_length(size as i64)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    bucket = %self.bucket,
                    key = %storage_key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(message)
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(message)
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }
}
