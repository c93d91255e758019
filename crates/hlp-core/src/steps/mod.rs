//! The three units of work of a pipeline run.
//!
//! Each step reads its inputs from the object store and leaves its result
//! there; steps share nothing else.

mod fetch;
mod process;
mod transcode;

pub use fetch::FetchHighlights;
pub use process::ProcessVideo;
pub use transcode::SubmitTranscode;

use crate::retry::StepError;

/// A named, retryable unit of work.
pub trait Step {
    fn name(&self) -> &str;

    fn run(&mut self) -> Result<(), StepError>;
}

#[cfg(test)]
pub(crate) mod fakes;
