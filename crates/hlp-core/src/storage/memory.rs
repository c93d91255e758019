//! In-memory object store.

use super::ObjectStore;
use crate::retry::StepError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Stored object with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug)]
pub struct MemoryStore {
    bucket: String,
    created: Mutex<bool>,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            created: Mutex::new(false),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Whether `ensure_bucket` has been called.
    pub fn bucket_created(&self) -> bool {
        *self.created.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn ensure_bucket(&self) -> Result<(), StepError> {
        *self.created.lock().unwrap_or_else(|e| e.into_inner()) = true;
        Ok(())
    }

    fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StepError> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StepError> {
        self.object(key)
            .map(|o| o.body)
            .ok_or_else(|| StepError::Storage(format!("no such key: {}/{}", self.bucket, key)))
    }
}
