//! In-memory collaborators for step and pipeline tests.

use crate::highlights::{HighlightQuery, HighlightSource};
use crate::retry::StepError;
use crate::transcode::{TranscodeJob, TranscodeService};
use crate::video::VideoSource;
use serde_json::Value;
use std::cell::RefCell;

pub struct StaticHighlights {
    result: Result<Value, u32>,
    queries: RefCell<Vec<HighlightQuery>>,
}

impl StaticHighlights {
    pub fn ok(doc: Value) -> Self {
        Self {
            result: Ok(doc),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(status: u32) -> Self {
        Self {
            result: Err(status),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<HighlightQuery> {
        self.queries.borrow().clone()
    }
}

impl HighlightSource for StaticHighlights {
    fn fetch(&self, query: &HighlightQuery) -> Result<Value, StepError> {
        self.queries.borrow_mut().push(query.clone());
        self.result.clone().map_err(StepError::Http)
    }
}

pub struct StaticVideos {
    result: Result<Vec<u8>, u32>,
    requested: RefCell<Vec<String>>,
}

impl StaticVideos {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            result: Ok(body),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(status: u32) -> Self {
        Self {
            result: Err(status),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl VideoSource for StaticVideos {
    fn download(&self, url: &str) -> Result<Vec<u8>, StepError> {
        self.requested.borrow_mut().push(url.to_string());
        self.result.clone().map_err(StepError::Http)
    }
}

#[derive(Default)]
pub struct RecordingTranscoder {
    jobs: RefCell<Vec<TranscodeJob>>,
}

impl RecordingTranscoder {
    pub fn jobs(&self) -> Vec<TranscodeJob> {
        self.jobs.borrow().clone()
    }
}

impl TranscodeService for RecordingTranscoder {
    fn submit(&self, job: &TranscodeJob) -> Result<String, StepError> {
        self.jobs.borrow_mut().push(job.clone());
        Ok(format!("job-{}", self.jobs.borrow().len()))
    }
}
