//! `hlp config` – print the effective configuration.

use anyhow::Result;
use hlp_core::config::{self, PipelineConfig};

pub fn run_show_config(cfg: &PipelineConfig) -> Result<()> {
    if let Ok(path) = config::config_path() {
        println!("# default config file: {}", path.display());
    }
    print!("{}", toml::to_string_pretty(&cfg.redacted())?);
    if let Err(e) = cfg.validate() {
        println!("# warning: {}", e);
    }
    Ok(())
}
