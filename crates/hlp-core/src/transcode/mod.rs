//! Transcode job submission.
//!
//! A [`TranscodeJob`] names the source video and the output prefix in object
//! storage; the encoding preset is fixed (MP4, H.264 + AAC).

mod mediaconvert;
mod settings;

pub use mediaconvert::MediaConvertService;
pub use settings::job_settings;

use crate::retry::StepError;

/// One transcode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    /// IAM role the service assumes to read input and write output.
    pub role_arn: String,
    /// `s3://bucket/key` of the source video.
    pub input: String,
    /// `s3://bucket/prefix/` the output is written under.
    pub output: String,
}

/// Accepts transcode jobs and returns the service's job id.
pub trait TranscodeService {
    fn submit(&self, job: &TranscodeJob) -> Result<String, StepError>;
}
