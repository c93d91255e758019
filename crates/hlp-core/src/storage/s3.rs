//! S3 backend.

use super::ObjectStore;
use crate::aws::AwsContext;
use crate::retry::StepError;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use std::sync::Arc;

/// Region where `CreateBucket` must be sent without a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// `CreateBucket` configuration for `region`; `us-east-1` takes none.
fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    if region == DEFAULT_REGION {
        return None;
    }
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

/// Only a modelled `NotFound` means the bucket has to be created.
fn is_missing_bucket(err: Option<&HeadBucketError>) -> bool {
    err.map(|e| e.is_not_found()).unwrap_or(false)
}

/// `op s3://bucket` for bucket-level calls, `op s3://bucket/key` for objects.
fn describe(op: &str, bucket: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("{} {}", op, super::s3_url(bucket, key)),
        None => format!("{} s3://{}", op, bucket),
    }
}

pub struct S3Store {
    ctx: Arc<AwsContext>,
    client: Client,
    bucket: String,
    region: String,
}

impl S3Store {
    pub fn new(ctx: Arc<AwsContext>, bucket: impl Into<String>, region: impl Into<String>) -> Self {
        let client = Client::new(ctx.sdk_config());
        Self {
            ctx,
            client,
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    fn error<E>(&self, op: &str, key: Option<&str>, err: E) -> StepError
    where
        E: std::error::Error + 'static,
    {
        StepError::Storage(format!(
            "{} failed: {}",
            describe(op, &self.bucket, key),
            DisplayErrorContext(&err)
        ))
    }

    fn create_bucket(&self) -> Result<(), StepError> {
        let req = self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .set_create_bucket_configuration(bucket_configuration(&self.region));
        self.ctx
            .block_on(req.send())
            .map_err(|e| self.error("create_bucket", None, e))?;
        tracing::info!("bucket {} created successfully", self.bucket);
        Ok(())
    }
}

impl ObjectStore for S3Store {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn ensure_bucket(&self) -> Result<(), StepError> {
        match self
            .ctx
            .block_on(self.client.head_bucket().bucket(&self.bucket).send())
        {
            Ok(_) => {
                tracing::debug!("bucket {} exists", self.bucket);
                Ok(())
            }
            Err(err) => {
                if !is_missing_bucket(err.as_service_error()) {
                    return Err(self.error("head_bucket", None, err));
                }
                tracing::info!("bucket {} does not exist, creating", self.bucket);
                self.create_bucket()
            }
        }
    }

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StepError> {
        let len = body.len();
        self.ctx
            .block_on(
                self.client
                    .put_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .content_type(content_type)
                    .body(ByteStream::from(body))
                    .send(),
            )
            .map_err(|e| self.error("put_object", Some(key), e))?;
        tracing::info!(bytes = len, "saved {}", self.url(key));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StepError> {
        self.ctx.block_on(async {
            let resp = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| self.error("get_object", Some(key), e))?;
            let data = resp
                .body
                .collect()
                .await
                .map_err(|e| self.error("read", Some(key), e))?;
            Ok::<_, StepError>(data.into_bytes().to_vec())
        })
    }
}
