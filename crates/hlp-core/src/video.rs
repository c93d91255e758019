//! Video download.

use crate::config::VideoConfig;
use crate::http::{self, CurlOptions};
use crate::retry::StepError;
use std::time::Duration;

/// Fetches the bytes behind a highlight's video URL.
pub trait VideoSource {
    fn download(&self, url: &str) -> Result<Vec<u8>, StepError>;
}

/// Single-stream GET with curl, buffered in memory.
#[derive(Debug, Clone, Copy)]
pub struct CurlVideoSource {
    curl: CurlOptions,
}

impl CurlVideoSource {
    pub fn new(cfg: &VideoConfig) -> Self {
        Self {
            curl: CurlOptions {
                connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
                timeout: Duration::from_secs(cfg.timeout_secs),
            },
        }
    }
}

impl VideoSource for CurlVideoSource {
    fn download(&self, url: &str) -> Result<Vec<u8>, StepError> {
        let bytes = http::get(url, &[], self.curl)?;
        tracing::debug!(bytes = bytes.len(), "downloaded video from {}", url);
        Ok(bytes)
    }
}
