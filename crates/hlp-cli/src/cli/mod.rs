//! CLI for the HLP highlight pipeline.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlp_core::config;
use std::path::PathBuf;

use commands::{run_pipeline, run_show_config, run_step, RunOverrides, StepKind};

/// Top-level CLI for the HLP highlight pipeline.
#[derive(Debug, Parser)]
#[command(name = "hlp")]
#[command(about = "HLP: fetch sports highlights, store them in S3 and submit a transcode job", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/hlp/config.toml when it exists).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to ~/.local/state/hlp/hlp.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run fetch, process and transcode in order, retrying each step.
    Run {
        /// Attempts per step, including the first (overrides RETRY_COUNT).
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        retries: Option<u32>,
        /// Seconds between attempts of one step (overrides RETRY_DELAY).
        #[arg(long, value_name = "SECS")]
        retry_delay: Option<u64>,
        /// Seconds between steps (overrides WAIT_TIME_BETWEEN_SCRIPTS).
        #[arg(long, value_name = "SECS")]
        cooldown: Option<u64>,
    },

    /// Fetch highlights and save the JSON to the bucket (single attempt).
    Fetch,

    /// Download the first highlight's video and save it to the bucket (single attempt).
    Process,

    /// Submit the MediaConvert job for the saved video (single attempt).
    Transcode,

    /// Print the effective configuration as TOML (API key masked).
    Config,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg.redacted());

        match self.command {
            CliCommand::Run {
                retries,
                retry_delay,
                cooldown,
            } => {
                let overrides = RunOverrides {
                    retries,
                    retry_delay,
                    cooldown,
                };
                run_pipeline(cfg, overrides)?;
            }
            CliCommand::Fetch => run_step(&cfg, StepKind::Fetch)?,
            CliCommand::Process => run_step(&cfg, StepKind::Process)?,
            CliCommand::Transcode => run_step(&cfg, StepKind::Transcode)?,
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
