use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Errors while building or validating [`PipelineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not locate XDG config directory: {0}")]
    Xdg(String),
}

/// Highlights API request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint returning the highlights JSON.
    pub url: String,
    /// Value of the `X-RapidAPI-Host` header.
    pub host: String,
    /// Value of the `X-RapidAPI-Key` header. No default.
    pub key: Option<String>,
    /// Day to fetch highlights for (YYYY-MM-DD).
    pub date: String,
    /// League filter, e.g. "NCAA".
    pub league: String,
    /// Maximum number of highlights returned.
    pub limit: u32,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://sport-highlights-api.p.rapidapi.com/basketball/highlights".to_string(),
            host: "sport-highlights-api.p.rapidapi.com".to_string(),
            key: None,
            date: "2023-12-01".to_string(),
            league: "NCAA".to_string(),
            limit: 10,
            timeout_secs: 120,
        }
    }
}

/// Object storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket holding every artifact. Required.
    pub bucket: Option<String>,
    pub region: String,
    /// Key of the fetched highlights JSON.
    pub highlights_key: String,
    /// Key of the downloaded source video.
    pub video_key: String,
    /// Prefix the transcoder writes its output under.
    pub output_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: "us-east-1".to_string(),
            highlights_key: "highlights/basketball_highlights.json".to_string(),
            video_key: "videos/first_video.mp4".to_string(),
            output_prefix: "processed_videos/".to_string(),
        }
    }
}

/// MediaConvert settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Account-specific endpoint; SDK default resolution when unset.
    pub endpoint: Option<String>,
    /// IAM role MediaConvert assumes to read input and write output.
    pub role_arn: Option<String>,
}

/// Video download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub connect_timeout_secs: u64,
    /// Overall download timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 600,
        }
    }
}

/// Retry and pacing parameters for the pipeline driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per step (including the first).
    pub max_attempts: u32,
    /// Delay in seconds between attempts of one step.
    pub delay_secs: u64,
    /// Cooldown in seconds between consecutive steps.
    pub cooldown_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 30,
            cooldown_secs: 60,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.delay_secs))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Whole pipeline configuration, built once at startup and passed down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub transcode: TranscodeConfig,
    pub video: VideoConfig,
    pub retry: RetryConfig,
}

impl PipelineConfig {
    /// Overlay environment variables read through `lookup`.
    ///
    /// Takes a lookup function instead of reading `std::env` directly so tests
    /// can inject values without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("API_URL") {
            self.api.url = v;
        }
        if let Some(v) = get("RAPIDAPI_HOST") {
            self.api.host = v;
        }
        if let Some(v) = get("RAPIDAPI_KEY") {
            self.api.key = Some(v);
        }
        if let Some(v) = get("DATE") {
            self.api.date = v;
        }
        if let Some(v) = get("LEAGUE_NAME") {
            self.api.league = v;
        }
        if let Some(v) = get("LIMIT") {
            self.api.limit = parse_num("LIMIT", &v)?;
        }
        if let Some(v) = get("S3_BUCKET_NAME") {
            self.storage.bucket = Some(v);
        }
        if let Some(v) = get("AWS_REGION") {
            self.storage.region = v;
        }
        if let Some(v) = get("INPUT_KEY") {
            self.storage.highlights_key = v;
        }
        if let Some(v) = get("OUTPUT_KEY") {
            self.storage.video_key = v;
        }
        if let Some(v) = get("TRANSCODE_OUTPUT_PREFIX") {
            self.storage.output_prefix = v;
        }
        if let Some(v) = get("MEDIACONVERT_ENDPOINT") {
            self.transcode.endpoint = Some(v);
        }
        if let Some(v) = get("MEDIACONVERT_ROLE_ARN") {
            self.transcode.role_arn = Some(v);
        }
        if let Some(v) = get("RETRY_COUNT") {
            self.retry.max_attempts = parse_num("RETRY_COUNT", &v)?;
        }
        if let Some(v) = get("RETRY_DELAY") {
            self.retry.delay_secs = parse_num("RETRY_DELAY", &v)?;
        }
        if let Some(v) = get("WAIT_TIME_BETWEEN_SCRIPTS") {
            self.retry.cooldown_secs = parse_num("WAIT_TIME_BETWEEN_SCRIPTS", &v)?;
        }
        Ok(())
    }

    /// Check the settings every step depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "RETRY_COUNT",
                value: "0".to_string(),
                expected: "positive attempt count",
            });
        }
        self.bucket()?;
        Ok(())
    }

    /// The required bucket name.
    pub fn bucket(&self) -> Result<&str, ConfigError> {
        self.storage
            .bucket
            .as_deref()
            .ok_or(ConfigError::Missing {
                var: "S3_BUCKET_NAME",
            })
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.api.key.is_some() {
            cfg.api.key = Some("********".to_string());
        }
        cfg
    }
}

fn parse_num<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
        expected: "non-negative integer",
    })
}

/// Default config file location: `~/.config/hlp/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("hlp").map_err(|e| ConfigError::Xdg(e.to_string()))?;
    Ok(xdg_dirs.get_config_home().join("hlp").join("config.toml"))
}

/// Parse a TOML config file.
pub fn load_file(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration: defaults, then the TOML file (explicit path, or the
/// XDG default if it exists), then the process environment.
pub fn load(explicit: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    let mut cfg = match explicit {
        Some(path) => load_file(path)?,
        None => {
            let path = config_path()?;
            if path.exists() {
                tracing::debug!("loading config from {}", path.display());
                load_file(&path)?
            } else {
                PipelineConfig::default()
            }
        }
    };
    cfg.apply_env(|var| std::env::var(var).ok())?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn default_config_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.api.date, "2023-12-01");
        assert_eq!(cfg.api.league, "NCAA");
        assert_eq!(cfg.api.limit, 10);
        assert!(cfg.api.key.is_none());
        assert!(cfg.storage.bucket.is_none());
        assert_eq!(cfg.storage.region, "us-east-1");
        assert_eq!(cfg.storage.highlights_key, "highlights/basketball_highlights.json");
        assert_eq!(cfg.storage.video_key, "videos/first_video.mp4");
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.retry.delay_secs, 30);
        assert_eq!(cfg.retry.cooldown_secs, 60);
    }

    #[test]
    fn env_overrides_defaults() {
        let mut cfg = PipelineConfig::default();
        cfg.apply_env(env(&[
            ("RAPIDAPI_KEY", "secret"),
            ("S3_BUCKET_NAME", "highlights-bucket"),
            ("AWS_REGION", "eu-west-1"),
            ("LIMIT", "25"),
            ("RETRY_COUNT", "5"),
            ("RETRY_DELAY", "0"),
            ("WAIT_TIME_BETWEEN_SCRIPTS", "2"),
            ("MEDIACONVERT_ROLE_ARN", "arn:aws:iam::123:role/mc"),
        ]))
        .unwrap();
        assert_eq!(cfg.api.key.as_deref(), Some("secret"));
        assert_eq!(cfg.bucket().unwrap(), "highlights-bucket");
        assert_eq!(cfg.storage.region, "eu-west-1");
        assert_eq!(cfg.api.limit, 25);
        assert_eq!(cfg.retry.policy(), RetryPolicy::new(5, Duration::ZERO));
        assert_eq!(cfg.retry.cooldown(), Duration::from_secs(2));
        assert_eq!(cfg.transcode.role_arn.as_deref(), Some("arn:aws:iam::123:role/mc"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = PipelineConfig::default();
        cfg.apply_env(env(&[("LEAGUE_NAME", ""), ("LIMIT", "  ")]))
            .unwrap();
        assert_eq!(cfg.api.league, "NCAA");
        assert_eq!(cfg.api.limit, 10);
    }

    #[test]
    fn invalid_number_is_reported() {
        let mut cfg = PipelineConfig::default();
        let err = cfg.apply_env(env(&[("RETRY_DELAY", "soon")])).unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, "RETRY_DELAY");
                assert_eq!(value, "soon");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn missing_bucket_fails_validation() {
        let cfg = PipelineConfig::default();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Missing {
                var: "S3_BUCKET_NAME"
            })
        ));
    }

    #[test]
    fn zero_attempts_fails_validation() {
        let mut cfg = PipelineConfig::default();
        cfg.storage.bucket = Some("b".into());
        cfg.retry.max_attempts = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            [api]
            league = "NBA"
            limit = 3

            [storage]
            bucket = "media"

            [retry]
            max_attempts = 1
        "#;
        let cfg: PipelineConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api.league, "NBA");
        assert_eq!(cfg.api.limit, 3);
        assert_eq!(cfg.api.date, "2023-12-01");
        assert_eq!(cfg.bucket().unwrap(), "media");
        assert_eq!(cfg.retry.max_attempts, 1);
        assert_eq!(cfg.retry.delay_secs, 30);
    }

    #[test]
    fn load_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\nbucket = \"from-file\"\nregion = \"us-west-2\"\n").unwrap();
        let mut cfg = load_file(&path).unwrap();
        cfg.apply_env(env(&[("S3_BUCKET_NAME", "from-env")])).unwrap();
        assert_eq!(cfg.bucket().unwrap(), "from-env");
        assert_eq!(cfg.storage.region, "us-west-2");
    }

    #[test]
    fn load_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[retry]\nmax_attempts = \"many\"\n").unwrap();
        assert!(matches!(load_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn redacted_masks_api_key() {
        let mut cfg = PipelineConfig::default();
        cfg.api.key = Some("secret".into());
        let shown = toml::to_string_pretty(&cfg.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("********"));
    }
}
