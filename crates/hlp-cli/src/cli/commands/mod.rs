//! CLI command handlers. Each command is in its own file.

mod config;
mod run;
mod services;
mod step;

pub use config::run_show_config;
pub use run::{run_pipeline, RunOverrides};
pub use step::{run_step, StepKind};
