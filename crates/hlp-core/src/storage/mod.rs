//! Object storage for pipeline artifacts.
//!
//! Steps talk to an [`ObjectStore`] scoped to one bucket. [`S3Store`] is the
//! production backend; [`MemoryStore`] keeps objects in a map for tests and
//! dry runs.

mod memory;
mod s3;

pub use memory::{MemoryStore, StoredObject};
pub use s3::S3Store;

use crate::retry::StepError;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MP4_CONTENT_TYPE: &str = "video/mp4";

/// Bucket-scoped object store.
pub trait ObjectStore {
    /// Bucket all keys are relative to.
    fn bucket(&self) -> &str;

    /// Create the bucket if it does not exist yet.
    fn ensure_bucket(&self) -> Result<(), StepError>;

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StepError>;

    fn get(&self, key: &str) -> Result<Vec<u8>, StepError>;

    /// `s3://bucket/key` location of `key`.
    fn url(&self, key: &str) -> String {
        s3_url(self.bucket(), key)
    }
}

/// `s3://bucket/key`, with a single slash between the two.
pub fn s3_url(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key.trim_start_matches('/'))
}
