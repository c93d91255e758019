//! Step 2: download the first highlight's video and save it to the store.

use super::Step;
use crate::highlights::first_video_url;
use crate::retry::StepError;
use crate::storage::{ObjectStore, MP4_CONTENT_TYPE};
use crate::video::VideoSource;

pub struct ProcessVideo<'a> {
    store: &'a dyn ObjectStore,
    videos: &'a dyn VideoSource,
    highlights_key: String,
    video_key: String,
}

impl<'a> ProcessVideo<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        videos: &'a dyn VideoSource,
        highlights_key: impl Into<String>,
        video_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            videos,
            highlights_key: highlights_key.into(),
            video_key: video_key.into(),
        }
    }
}

impl Step for ProcessVideo<'_> {
    fn name(&self) -> &str {
        "process"
    }

    fn run(&mut self) -> Result<(), StepError> {
        tracing::info!("reading {}", self.store.url(&self.highlights_key));
        let raw = self.store.get(&self.highlights_key)?;
        let doc: serde_json::Value = serde_json::from_slice(&raw)
            .map_err(|e| StepError::Data(format!("stored highlights are not JSON: {}", e)))?;
        let url = first_video_url(&doc)?;

        tracing::info!("downloading video {}", url);
        let video = self.videos.download(url)?;

        self.store.put(&self.video_key, video, MP4_CONTENT_TYPE)?;
        tracing::info!("video uploaded to {}", self.store.url(&self.video_key));
        Ok(())
    }
}
