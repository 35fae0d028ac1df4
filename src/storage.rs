use anyhow::Context;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client,
};
use aws_smithy_types::byte_stream::ByteStream;
use axum::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::config::S3Config;

#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Check the bucket exists, creating it if absent. Idempotent.
    async fn ensure_bucket(&self) -> anyhow::Result<()>;
    /// Upload bytes under `key` and return the public URL.
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str)
        -> anyhow::Result<String>;
    /// All keys under `prefix`; empty when none.
    async fn list_objects(&self, prefix: &str) -> anyhow::Result<Vec<String>>;
    /// Deterministic public URL for a key. Assumes a public-read bucket.
    fn object_url(&self, key: &str) -> String;
}

/// Token for the next listing page. None ends the pagination loop, including
/// the degenerate response that claims truncation but carries no continuation
/// token; following it blindly would re-fetch the first page forever.
fn next_page_token(is_truncated: Option<bool>, next_token: Option<&str>) -> Option<String> {
    if is_truncated.unwrap_or(false) {
        next_token.map(str::to_string)
    } else {
        None
    }
}

/// URL templating shared by the real client and tests. Virtual-host style for
/// AWS proper, path style when a custom endpoint (LocalStack/MinIO) is set.
pub fn public_object_url(endpoint: Option<&str>, bucket: &str, key: &str) -> String {
    match endpoint {
        Some(ep) => format!("{}/{}/{}", ep.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.amazonaws.com/{}", bucket, key),
    }
}

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl Storage {
    pub async fn new(cfg: &S3Config) -> anyhow::Result<Self> {
        let mut loader = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                cfg.access_key.clone(),
                cfg.secret_key.clone(),
                None,
                None,
                "static",
            ));
        if let Some(endpoint) = &cfg.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let mut builder = S3ConfigBuilder::from(&shared);
        if let Some(endpoint) = &cfg.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: cfg.bucket.clone(),
            region: cfg.region.clone(),
            endpoint: cfg.endpoint.clone(),
        })
    }

    async fn create_bucket(&self) -> anyhow::Result<()> {
        let mut req = self.client.create_bucket().bucket(&self.bucket);
        if self.region != "us-east-1" {
            req = req.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        match req.send().await {
            Ok(_) => {
                info!(bucket = %self.bucket, "bucket created");
                Ok(())
            }
            // Lost a creation race or re-ran against an existing bucket.
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_bucket_already_owned_by_you() || e.is_bucket_already_exists())
                    .unwrap_or(false) =>
            {
                info!(bucket = %self.bucket, "bucket already exists");
                Ok(())
            }
            Err(err) => Err(anyhow::Error::from(err).context("s3 create_bucket")),
        }
    }
}

#[async_trait]
impl StorageClient for Storage {
    async fn ensure_bucket(&self) -> anyhow::Result<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                info!(bucket = %self.bucket, "bucket already exists");
                Ok(())
            }
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false) =>
            {
                self.create_bucket().await
            }
            Err(err) => Err(anyhow::Error::from(err).context("s3 head_bucket")),
        }
    }

    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> anyhow::Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .context("s3 put_object")?;
        Ok(self.object_url(key))
    }

    async fn list_objects(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(t) = &token {
                req = req.continuation_token(t);
            }
            let resp = req.send().await.context("s3 list_objects_v2")?;
            for obj in resp.contents() {
                if let Some(key) = obj.key() {
                    keys.push(key.to_string());
                }
            }
            token = next_page_token(resp.is_truncated(), resp.next_continuation_token());
            if token.is_none() {
                break;
            }
        }
        Ok(keys)
    }

    fn object_url(&self, key: &str) -> String {
        public_object_url(self.endpoint.as_deref(), &self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::{next_page_token, public_object_url};

    #[test]
    fn pagination_continues_only_with_a_token() {
        assert_eq!(
            next_page_token(Some(true), Some("abc")),
            Some("abc".to_string())
        );
        assert_eq!(next_page_token(Some(false), Some("abc")), None);
        assert_eq!(next_page_token(None, Some("abc")), None);
    }

    #[test]
    fn pagination_stops_when_truncated_without_a_token() {
        assert_eq!(next_page_token(Some(true), None), None);
    }

    #[test]
    fn aws_urls_use_virtual_host_style() {
        assert_eq!(
            public_object_url(None, "my-bucket", "thumbnails/a.jpg"),
            "https://my-bucket.s3.amazonaws.com/thumbnails/a.jpg"
        );
    }

    #[test]
    fn custom_endpoint_urls_use_path_style() {
        assert_eq!(
            public_object_url(Some("http://localhost:4566"), "my-bucket", "k.png"),
            "http://localhost:4566/my-bucket/k.png"
        );
        assert_eq!(
            public_object_url(Some("http://localhost:4566/"), "my-bucket", "k.png"),
            "http://localhost:4566/my-bucket/k.png"
        );
    }
}
