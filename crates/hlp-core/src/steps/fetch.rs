//! Step 1: fetch the highlights document and save it to the store.

use super::Step;
use crate::highlights::{is_empty_document, HighlightQuery, HighlightSource};
use crate::retry::StepError;
use crate::storage::{ObjectStore, JSON_CONTENT_TYPE};

pub struct FetchHighlights<'a> {
    source: &'a dyn HighlightSource,
    store: &'a dyn ObjectStore,
    query: HighlightQuery,
    key: String,
}

impl<'a> FetchHighlights<'a> {
    pub fn new(
        source: &'a dyn HighlightSource,
        store: &'a dyn ObjectStore,
        query: HighlightQuery,
        key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            query,
            key: key.into(),
        }
    }
}

impl Step for FetchHighlights<'_> {
    fn name(&self) -> &str {
        "fetch"
    }

    fn run(&mut self) -> Result<(), StepError> {
        tracing::info!(
            date = %self.query.date,
            league = %self.query.league,
            limit = self.query.limit,
            "fetching highlights"
        );
        let doc = self.source.fetch(&self.query)?;
        if is_empty_document(&doc) {
            return Err(StepError::Data("highlights response is empty".to_string()));
        }

        self.store.ensure_bucket()?;
        let body = serde_json::to_vec(&doc)
            .map_err(|e| StepError::Data(format!("cannot serialize highlights: {}", e)))?;
        self.store.put(&self.key, body, JSON_CONTENT_TYPE)?;
        tracing::info!("highlights saved to {}", self.store.url(&self.key));
        Ok(())
    }
}
