//! Blocking HTTP GET over libcurl.
//!
//! Shared by the highlights API client and the video downloader. Errors come
//! back as [`StepError`] so the retry loop can classify them.

use crate::retry::StepError;
use std::time::Duration;

/// Per-request curl settings.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Overall transfer timeout.
    pub timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Performs a GET and returns the full response body.
///
/// Follows redirects. `headers` are sent as `Name: value` lines. Any non-2xx
/// status is returned as `StepError::Http`.
pub fn get(url: &str, headers: &[(&str, &str)], opts: CurlOptions) -> Result<Vec<u8>, StepError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    if !headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::debug!("GET {} returned HTTP {}", url, code);
        return Err(StepError::Http(code));
    }
    Ok(body)
}
