//! Production collaborators: curl for HTTP, S3 and MediaConvert for AWS.

use anyhow::Result;
use hlp_core::aws::AwsContext;
use hlp_core::config::PipelineConfig;
use hlp_core::highlights::HighlightsApi;
use hlp_core::pipeline::Services;
use hlp_core::storage::S3Store;
use hlp_core::transcode::MediaConvertService;
use hlp_core::video::CurlVideoSource;
use std::sync::Arc;

pub struct Production {
    highlights: HighlightsApi,
    store: S3Store,
    videos: CurlVideoSource,
    transcoder: MediaConvertService,
}

impl Production {
    /// Validate `cfg` and build every collaborator from it.
    pub fn connect(cfg: &PipelineConfig) -> Result<Self> {
        cfg.validate()?;
        let ctx = Arc::new(AwsContext::load(&cfg.storage.region)?);
        Ok(Self {
            highlights: HighlightsApi::new(&cfg.api),
            store: S3Store::new(Arc::clone(&ctx), cfg.bucket()?, &cfg.storage.region),
            videos: CurlVideoSource::new(&cfg.video),
            transcoder: MediaConvertService::new(ctx, cfg.transcode.endpoint.as_deref()),
        })
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            highlights: &self.highlights,
            store: &self.store,
            videos: &self.videos,
            transcoder: &self.transcoder,
        }
    }
}
