//! `hlp run` – the whole pipeline with retries and cooldown.

use anyhow::Result;
use hlp_core::config::PipelineConfig;
use hlp_core::pipeline::Pipeline;
use hlp_core::retry::ThreadSleeper;

use super::services::Production;

/// Command-line overrides for the retry settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOverrides {
    pub retries: Option<u32>,
    pub retry_delay: Option<u64>,
    pub cooldown: Option<u64>,
}

impl RunOverrides {
    pub fn apply(&self, cfg: &mut PipelineConfig) {
        if let Some(n) = self.retries {
            cfg.retry.max_attempts = n;
        }
        if let Some(secs) = self.retry_delay {
            cfg.retry.delay_secs = secs;
        }
        if let Some(secs) = self.cooldown {
            cfg.retry.cooldown_secs = secs;
        }
    }
}

pub fn run_pipeline(mut cfg: PipelineConfig, overrides: RunOverrides) -> Result<()> {
    overrides.apply(&mut cfg);
    let production = Production::connect(&cfg)?;

    let mut pipeline = Pipeline::standard(&cfg, production.services());
    let report = pipeline
        .run(&ThreadSleeper)
        .map_err(|failure| anyhow::Error::new(failure).context("pipeline failed"))?;

    for step in &report.steps {
        println!("{:<10} ok ({} attempt(s))", step.name, step.attempts);
    }
    println!("All steps executed successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let mut cfg = PipelineConfig::default();
        RunOverrides {
            retries: Some(5),
            retry_delay: None,
            cooldown: Some(0),
        }
        .apply(&mut cfg);
        assert_eq!(cfg.retry.max_attempts, 5);
        assert_eq!(cfg.retry.delay_secs, 30);
        assert_eq!(cfg.retry.cooldown_secs, 0);
    }
}
