//! Highlights API client.
//!
//! Fetches the highlights document for a date/league from a RapidAPI-style
//! endpoint. The document is kept as raw JSON; only `data[0].url` is read later.

mod parse;

pub use parse::{first_video_url, is_empty_document};

use crate::config::ApiConfig;
use crate::http::{self, CurlOptions};
use crate::retry::StepError;
use serde_json::Value;
use std::time::Duration;

/// What to ask the highlights API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightQuery {
    pub date: String,
    pub league: String,
    pub limit: u32,
}

impl HighlightQuery {
    pub fn from_config(cfg: &ApiConfig) -> Self {
        Self {
            date: cfg.date.clone(),
            league: cfg.league.clone(),
            limit: cfg.limit,
        }
    }
}

/// Source of highlight documents.
pub trait HighlightSource {
    fn fetch(&self, query: &HighlightQuery) -> Result<Value, StepError>;
}

/// Production client: GET `url?date=..&leagueName=..&limit=..` with RapidAPI headers.
#[derive(Debug, Clone)]
pub struct HighlightsApi {
    url: String,
    host: String,
    key: Option<String>,
    curl: CurlOptions,
}

impl HighlightsApi {
    pub fn new(cfg: &ApiConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            host: cfg.host.clone(),
            key: cfg.key.clone(),
            curl: CurlOptions {
                timeout: Duration::from_secs(cfg.timeout_secs),
                ..CurlOptions::default()
            },
        }
    }

    /// Full request URL with the query string.
    pub fn request_url(&self, query: &HighlightQuery) -> Result<String, StepError> {
        let limit = query.limit.to_string();
        let url = url::Url::parse_with_params(
            &self.url,
            &[
                ("date", query.date.as_str()),
                ("leagueName", query.league.as_str()),
                ("limit", limit.as_str()),
            ],
        )
        .map_err(|e| StepError::Config(format!("invalid API_URL {:?}: {}", self.url, e)))?;
        Ok(url.into())
    }
}

impl HighlightSource for HighlightsApi {
    fn fetch(&self, query: &HighlightQuery) -> Result<Value, StepError> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| StepError::Config("RAPIDAPI_KEY is not set".to_string()))?;
        let url = self.request_url(query)?;
        tracing::debug!(%url, "fetching highlights");

        let body = http::get(
            &url,
            &[("X-RapidAPI-Key", key), ("X-RapidAPI-Host", &self.host)],
            self.curl,
        )?;
        let doc: Value = serde_json::from_slice(&body)
            .map_err(|e| StepError::Data(format!("highlights response is not JSON: {}", e)))?;
        tracing::info!("highlights fetched successfully");
        Ok(doc)
    }
}
