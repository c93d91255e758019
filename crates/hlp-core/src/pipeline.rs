//! Sequencing driver: runs steps in order with retries and a cooldown between them.

use crate::config::PipelineConfig;
use crate::highlights::{HighlightQuery, HighlightSource};
use crate::retry::{run_with_retry, RetryPolicy, Sleeper, StepFailure};
use crate::steps::{FetchHighlights, ProcessVideo, Step, SubmitTranscode};
use crate::storage::ObjectStore;
use crate::transcode::TranscodeService;
use crate::video::VideoSource;
use std::time::Duration;

/// Attempts used by one completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: String,
    pub attempts: u32,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub steps: Vec<StepReport>,
}

/// External collaborators the standard steps are built from.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub highlights: &'a dyn HighlightSource,
    pub store: &'a dyn ObjectStore,
    pub videos: &'a dyn VideoSource,
    pub transcoder: &'a dyn TranscodeService,
}

impl<'a> Services<'a> {
    pub fn fetch_step(&self, cfg: &PipelineConfig) -> FetchHighlights<'a> {
        FetchHighlights::new(
            self.highlights,
            self.store,
            HighlightQuery::from_config(&cfg.api),
            cfg.storage.highlights_key.clone(),
        )
    }

    pub fn process_step(&self, cfg: &PipelineConfig) -> ProcessVideo<'a> {
        ProcessVideo::new(
            self.store,
            self.videos,
            cfg.storage.highlights_key.clone(),
            cfg.storage.video_key.clone(),
        )
    }

    pub fn transcode_step(&self, cfg: &PipelineConfig) -> SubmitTranscode<'a> {
        SubmitTranscode::new(
            self.transcoder,
            cfg.transcode.role_arn.clone(),
            self.store.bucket(),
            &cfg.storage.video_key,
            &cfg.storage.output_prefix,
        )
    }
}

/// Ordered list of steps sharing one retry policy and cooldown.
pub struct Pipeline<'a> {
    steps: Vec<Box<dyn Step + 'a>>,
    policy: RetryPolicy,
    cooldown: Duration,
}

impl<'a> Pipeline<'a> {
    pub fn new(policy: RetryPolicy, cooldown: Duration) -> Self {
        Self {
            steps: Vec::new(),
            policy,
            cooldown,
        }
    }

    /// fetch → process → transcode, with retry and cooldown from `cfg`.
    pub fn standard(cfg: &PipelineConfig, services: Services<'a>) -> Self {
        Self::new(cfg.retry.policy(), cfg.retry.cooldown())
            .step(services.fetch_step(cfg))
            .step(services.process_step(cfg))
            .step(services.transcode_step(cfg))
    }

    pub fn step(mut self, step: impl Step + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order. Stops at the first step that fails terminally
    /// and returns its failure; completed steps are left as they are.
    pub fn run(&mut self, sleeper: &dyn Sleeper) -> Result<PipelineReport, StepFailure> {
        let mut report = PipelineReport::default();
        let total = self.steps.len();
        for (i, step) in self.steps.iter_mut().enumerate() {
            let name = step.name().to_string();
            let attempts = run_with_retry(&name, &self.policy, sleeper, || step.run())?;
            report.steps.push(StepReport { name, attempts });

            if i + 1 < total {
                tracing::info!(
                    "waiting {}s for resources to stabilize",
                    self.cooldown.as_secs()
                );
                sleeper.sleep(self.cooldown);
            }
        }
        tracing::info!("all steps completed successfully");
        Ok(report)
    }
}

/// Run a single step once, without retries.
pub fn run_once(step: &mut dyn Step, sleeper: &dyn Sleeper) -> Result<(), StepFailure> {
    let name = step.name().to_string();
    run_with_retry(&name, &RetryPolicy::once(), sleeper, || step.run()).map(|_| ())
}
