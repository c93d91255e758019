//! Step 3: submit the transcode job for the uploaded video.

use super::Step;
use crate::retry::StepError;
use crate::storage::s3_url;
use crate::transcode::{TranscodeJob, TranscodeService};

pub struct SubmitTranscode<'a> {
    service: &'a dyn TranscodeService,
    role_arn: Option<String>,
    input: String,
    output: String,
}

impl<'a> SubmitTranscode<'a> {
    pub fn new(
        service: &'a dyn TranscodeService,
        role_arn: Option<String>,
        bucket: &str,
        video_key: &str,
        output_prefix: &str,
    ) -> Self {
        Self {
            service,
            role_arn,
            input: s3_url(bucket, video_key),
            output: s3_url(bucket, output_prefix),
        }
    }
}

impl Step for SubmitTranscode<'_> {
    fn name(&self) -> &str {
        "transcode"
    }

    fn run(&mut self) -> Result<(), StepError> {
        let role_arn = self
            .role_arn
            .clone()
            .ok_or_else(|| StepError::Config("MEDIACONVERT_ROLE_ARN is not set".to_string()))?;
        let job = TranscodeJob {
            role_arn,
            input: self.input.clone(),
            output: self.output.clone(),
        };
        let id = self.service.submit(&job)?;
        tracing::info!(job_id = %id, input = %job.input, output = %job.output, "transcode job created");
        Ok(())
    }
}
