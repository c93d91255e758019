//! Shared AWS SDK context.
//!
//! The SDK is async while the pipeline is not, so every AWS call is driven to
//! completion on a private current-thread runtime.

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::future::Future;

pub struct AwsContext {
    runtime: tokio::runtime::Runtime,
    sdk: SdkConfig,
}

impl AwsContext {
    /// Load credentials and settings from the default provider chain for `region`.
    pub fn load(region: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build runtime for AWS calls")?;
        let sdk = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );
        tracing::debug!(region, "loaded AWS configuration");
        Ok(Self { runtime, sdk })
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk
    }

    /// Block the calling thread until `fut` completes.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}
