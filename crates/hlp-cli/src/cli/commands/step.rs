//! `hlp fetch|process|transcode` – one step, one attempt.

use anyhow::Result;
use hlp_core::config::PipelineConfig;
use hlp_core::pipeline::run_once;
use hlp_core::retry::ThreadSleeper;

use super::services::Production;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Fetch,
    Process,
    Transcode,
}

pub fn run_step(cfg: &PipelineConfig, kind: StepKind) -> Result<()> {
    let production = Production::connect(cfg)?;
    let services = production.services();

    match kind {
        StepKind::Fetch => run_once(&mut services.fetch_step(cfg), &ThreadSleeper)?,
        StepKind::Process => run_once(&mut services.process_step(cfg), &ThreadSleeper)?,
        StepKind::Transcode => run_once(&mut services.transcode_step(cfg), &ThreadSleeper)?,
    }
    println!("{:?} completed successfully.", kind);
    Ok(())
}
