pub mod config;
pub mod logging;

pub mod aws;
pub mod highlights;
pub mod http;
pub mod pipeline;
pub mod retry;
pub mod steps;
pub mod storage;
pub mod transcode;
pub mod video;
