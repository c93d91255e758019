//! MediaConvert backend.

use super::settings::{acceleration_settings, job_settings, status_update_interval, JOB_PRIORITY};
use super::{TranscodeJob, TranscodeService};
use crate::aws::AwsContext;
use crate::retry::StepError;
use aws_sdk_mediaconvert::error::DisplayErrorContext;
use aws_sdk_mediaconvert::Client;
use std::sync::Arc;

pub struct MediaConvertService {
    ctx: Arc<AwsContext>,
    client: Client,
}

impl MediaConvertService {
    /// `endpoint` is the account-specific MediaConvert endpoint, if one is configured.
    pub fn new(ctx: Arc<AwsContext>, endpoint: Option<&str>) -> Self {
        let mut conf = aws_sdk_mediaconvert::config::Builder::from(ctx.sdk_config());
        if let Some(endpoint) = endpoint {
            conf = conf.endpoint_url(endpoint);
        }
        let client = Client::from_conf(conf.build());
        Self { ctx, client }
    }
}

impl TranscodeService for MediaConvertService {
    fn submit(&self, job: &TranscodeJob) -> Result<String, StepError> {
        let acceleration = acceleration_settings().map_err(|e| StepError::Transcode(e.to_string()))?;

        let resp = self
            .ctx
            .block_on(
                self.client
                    .create_job()
                    .role(&job.role_arn)
                    .settings(job_settings(job))
                    .acceleration_settings(acceleration)
                    .status_update_interval(status_update_interval())
                    .priority(JOB_PRIORITY)
                    .send(),
            )
            .map_err(|e| StepError::Transcode(format!("create_job failed: {}", DisplayErrorContext(&e))))?;

        let id = resp
            .job()
            .and_then(|j| j.id())
            .ok_or_else(|| StepError::Transcode("create_job response carried no job id".to_string()))?;
        Ok(id.to_string())
    }
}
